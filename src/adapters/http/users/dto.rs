//! HTTP DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp, UserId};
use crate::domain::user::User;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to change a user's role. The value is checked by the handler so
/// an unknown role reads as "Invalid role" instead of a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    pub role: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A user as clients see it. The identity-provider uid is never exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            photo_url: user.photo_url,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// `{message, user}` returned by user mutations.
#[derive(Debug, Clone, Serialize)]
pub struct UserMessageResponse {
    pub message: String,
    pub user: UserResponse,
}

impl UserMessageResponse {
    pub fn new(message: impl Into<String>, user: User) -> Self {
        Self {
            message: message.into(),
            user: user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_uses_photo_url_casing_and_hides_uid() {
        let user = User::register("Nadia", "n@example.com", Some("https://p".into()), "uid-1").unwrap();
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["photoURL"], "https://p");
        assert_eq!(json["role"], "member");
        assert!(json.get("externalUid").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
