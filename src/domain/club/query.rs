//! Listing criteria and read projections for clubs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClubId, Money, PageRequest, SortOrder};

use super::{Club, ClubCategory, ClubStatus};

/// Columns a public club listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClubSortField {
    #[default]
    CreatedAt,
    ClubName,
    MemberCount,
    MembershipFee,
}

impl ClubSortField {
    pub fn as_column(&self) -> &'static str {
        match self {
            ClubSortField::CreatedAt => "created_at",
            ClubSortField::ClubName => "club_name",
            ClubSortField::MemberCount => "member_count",
            ClubSortField::MembershipFee => "membership_fee_cents",
        }
    }
}

/// Criteria for the public approved-club listing.
#[derive(Debug, Clone)]
pub struct ClubQuery {
    /// Case-insensitive substring of the club name.
    pub search: Option<String>,
    pub category: Option<ClubCategory>,
    pub sort: ClubSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

impl Default for ClubQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort: ClubSortField::CreatedAt,
            order: SortOrder::Desc,
            page: PageRequest::default(),
        }
    }
}

impl ClubQuery {
    /// Returns true when `club` passes the filters (ignoring paging).
    pub fn matches(&self, club: &Club) -> bool {
        if club.status != ClubStatus::Approved {
            return false;
        }
        if let Some(category) = self.category {
            if club.category != category {
                return false;
            }
        }
        match &self.search {
            Some(term) => club
                .club_name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// Club fields attached to events, memberships and payments for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubSummary {
    pub id: ClubId,
    pub club_name: String,
    pub location: String,
    pub category: ClubCategory,
    pub banner_image: String,
    pub membership_fee: Money,
    pub manager_email: String,
}

impl From<&Club> for ClubSummary {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id,
            club_name: club.club_name.clone(),
            location: club.location.clone(),
            category: club.category,
            banner_image: club.banner_image.clone(),
            membership_fee: club.membership_fee,
            manager_email: club.manager_email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::club::NewClub;

    fn approved(name: &str, category: ClubCategory) -> Club {
        let mut club = Club::create(
            NewClub {
                club_name: name.to_string(),
                description: "d".to_string(),
                category,
                location: "l".to_string(),
                banner_image: None,
                membership_fee: None,
            },
            "m@example.com",
        )
        .unwrap();
        club.status = ClubStatus::Approved;
        club
    }

    #[test]
    fn defaults_sort_newest_first() {
        let query = ClubQuery::default();
        assert_eq!(query.sort, ClubSortField::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.page.limit(), 12);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = ClubQuery {
            search: Some("ENTHUS".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&approved("Photography Enthusiasts", ClubCategory::Photography)));
        assert!(!query.matches(&approved("Chess Club", ClubCategory::Other)));
    }

    #[test]
    fn pending_clubs_never_match() {
        let mut club = approved("Runners", ClubCategory::Sports);
        club.status = ClubStatus::Pending;
        assert!(!ClubQuery::default().matches(&club));
    }

    #[test]
    fn category_filter_is_exact() {
        let query = ClubQuery {
            category: Some(ClubCategory::Sports),
            ..Default::default()
        };
        assert!(query.matches(&approved("Runners", ClubCategory::Sports)));
        assert!(!query.matches(&approved("Coders", ClubCategory::Tech)));
    }

    #[test]
    fn sort_field_parses_camel_case() {
        let field: ClubSortField = serde_json::from_str("\"memberCount\"").unwrap();
        assert_eq!(field, ClubSortField::MemberCount);
        assert!(serde_json::from_str::<ClubSortField>("\"managerEmail\"").is_err());
    }
}
