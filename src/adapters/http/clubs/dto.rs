//! HTTP DTOs for club endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::params::{deserialize_amount, money, non_blank};
use crate::domain::club::{
    Club, ClubCategory, ClubQuery, ClubSortField, ClubStatus, ClubSummary, ClubUpdate, NewClub,
};
use crate::domain::foundation::{ClubId, DomainError, Money, PageRequest, SortOrder, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a club. Missing text fields reach domain validation as
/// empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequest {
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
    #[serde(default)]
    pub location: String,
    pub banner_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub membership_fee: Option<f64>,
}

impl CreateClubRequest {
    pub fn into_new_club(self) -> Result<NewClub, DomainError> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(DomainError::validation("category", "category is required"))
            }
            Some(raw) => raw.parse::<ClubCategory>()?,
        };

        Ok(NewClub {
            club_name: self.club_name,
            description: self.description,
            category,
            location: self.location,
            banner_image: self.banner_image,
            membership_fee: money("membershipFee", self.membership_fee)?,
        })
    }
}

/// Partial club update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubRequest {
    pub club_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub banner_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub membership_fee: Option<f64>,
}

impl UpdateClubRequest {
    pub fn into_update(self) -> Result<ClubUpdate, DomainError> {
        let category = self
            .category
            .map(|raw| raw.trim().parse::<ClubCategory>())
            .transpose()?;

        Ok(ClubUpdate {
            club_name: self.club_name,
            description: self.description,
            category,
            location: self.location,
            banner_image: self.banner_image,
            membership_fee: money("membershipFee", self.membership_fee)?,
        })
    }
}

/// Request to approve or reject a club.
#[derive(Debug, Clone, Deserialize)]
pub struct ClubStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Query string of the public listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<ClubSortField>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ClubListParams {
    /// `category=all` and empty values mean "no filter".
    pub fn into_query(self) -> Result<ClubQuery, DomainError> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse::<ClubCategory>()?),
        };
        let defaults = ClubQuery::default();

        Ok(ClubQuery {
            search: non_blank(self.search),
            category,
            sort: self.sort.unwrap_or(defaults.sort),
            order: self.order.unwrap_or(defaults.order),
            page: PageRequest::new(self.page, self.limit),
        })
    }
}

/// Query string of the admin listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminClubParams {
    pub status: Option<String>,
}

impl AdminClubParams {
    /// `status=all` and empty values mean "every status".
    pub fn status_filter(&self) -> Result<Option<ClubStatus>, DomainError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => Ok(Some(raw.parse::<ClubStatus>()?)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubResponse {
    pub id: ClubId,
    pub club_name: String,
    pub description: String,
    pub category: ClubCategory,
    pub location: String,
    pub banner_image: String,
    pub membership_fee: Money,
    pub status: ClubStatus,
    pub manager_email: String,
    pub member_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            club_name: club.club_name,
            description: club.description,
            category: club.category,
            location: club.location,
            banner_image: club.banner_image,
            membership_fee: club.membership_fee,
            status: club.status,
            manager_email: club.manager_email,
            member_count: club.member_count,
            created_at: club.created_at,
            updated_at: club.updated_at,
        }
    }
}

/// Club fields embedded in events and memberships.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummaryResponse {
    pub id: ClubId,
    pub club_name: String,
    pub location: String,
    pub category: ClubCategory,
    pub banner_image: String,
    pub membership_fee: Money,
    pub manager_email: String,
}

impl From<ClubSummary> for ClubSummaryResponse {
    fn from(club: ClubSummary) -> Self {
        Self {
            id: club.id,
            club_name: club.club_name,
            location: club.location,
            category: club.category,
            banner_image: club.banner_image,
            membership_fee: club.membership_fee,
            manager_email: club.manager_email,
        }
    }
}

/// `{message, club}` returned by club mutations.
#[derive(Debug, Clone, Serialize)]
pub struct ClubMessageResponse {
    pub message: String,
    pub club: ClubResponse,
}

impl ClubMessageResponse {
    pub fn new(message: impl Into<String>, club: Club) -> Self {
        Self {
            message: message.into(),
            club: club.into(),
        }
    }
}

pub fn club_list(clubs: Vec<Club>) -> Vec<ClubResponse> {
    clubs.into_iter().map(ClubResponse::from).collect()
}
