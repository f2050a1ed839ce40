//! HTTP DTOs for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::users::UserResponse;
use crate::application::RegisterUserCommand;

/// Request to register after identity-provider sign-up. Missing fields reach
/// domain validation as empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(rename = "firebaseUID", default)]
    pub firebase_uid: String,
}

impl From<RegisterRequest> for RegisterUserCommand {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            photo_url: request.photo_url.filter(|url| !url.trim().is_empty()),
            external_uid: request.firebase_uid,
        }
    }
}

/// `{user}` for the current-user lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
}
