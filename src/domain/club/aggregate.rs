//! Club aggregate entity.
//!
//! # Invariants
//!
//! - `status` starts `Pending` and only admins change it
//! - `manager_email` is copied from the creator and never taken from input
//! - `membership_fee` is non-negative (enforced by `Money`)
//! - `member_count` is a cached count of memberships, only ever incremented
//!   by the join transaction

use crate::domain::foundation::{
    ClubId, DomainError, Money, OwnedByEmail, StateMachine, Timestamp,
};

use super::{ClubCategory, ClubStatus};

/// A community with an approval workflow and an optional joining fee.
#[derive(Debug, Clone, PartialEq)]
pub struct Club {
    pub id: ClubId,
    pub club_name: String,
    pub description: String,
    pub category: ClubCategory,
    pub location: String,
    pub banner_image: String,
    pub membership_fee: Money,
    pub status: ClubStatus,

    /// Email snapshot of the creating manager.
    pub manager_email: String,

    pub member_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields a manager supplies when creating a club.
#[derive(Debug, Clone)]
pub struct NewClub {
    pub club_name: String,
    pub description: String,
    pub category: ClubCategory,
    pub location: String,
    pub banner_image: Option<String>,
    pub membership_fee: Option<Money>,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ClubUpdate {
    pub club_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ClubCategory>,
    pub location: Option<String>,
    pub banner_image: Option<String>,
    pub membership_fee: Option<Money>,
}

impl Club {
    /// Creates a pending club owned by `manager_email`.
    pub fn create(fields: NewClub, manager_email: impl Into<String>) -> Result<Self, DomainError> {
        let club_name = fields.club_name.trim().to_string();
        require_text("clubName", &club_name)?;
        require_text("description", &fields.description)?;
        require_text("location", &fields.location)?;

        let now = Timestamp::now();
        Ok(Self {
            id: ClubId::new(),
            club_name,
            description: fields.description,
            category: fields.category,
            location: fields.location,
            banner_image: fields.banner_image.unwrap_or_default(),
            membership_fee: fields.membership_fee.unwrap_or(Money::ZERO),
            status: ClubStatus::Pending,
            manager_email: manager_email.into(),
            member_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies every field present in `update`, including empty strings and
    /// a zero fee.
    pub fn apply_update(&mut self, update: ClubUpdate) {
        if let Some(club_name) = update.club_name {
            self.club_name = club_name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(banner_image) = update.banner_image {
            self.banner_image = banner_image;
        }
        if let Some(fee) = update.membership_fee {
            self.membership_fee = fee;
        }
        self.updated_at = Timestamp::now();
    }

    /// Moves the club to an admin-chosen status.
    pub fn set_status(&mut self, status: ClubStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(status)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_approved(&self) -> bool {
        self.status.is_public()
    }

    pub fn requires_payment(&self) -> bool {
        !self.membership_fee.is_zero()
    }
}

impl OwnedByEmail for Club {
    fn owner_email(&self) -> &str {
        &self.manager_email
    }
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(
            field,
            format!("{} is required", field),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthenticatedUser, ErrorCode, Role, UserId};

    fn new_club() -> NewClub {
        NewClub {
            club_name: "  Photography Enthusiasts ".to_string(),
            description: "Shoot together".to_string(),
            category: ClubCategory::Photography,
            location: "Dhaka".to_string(),
            banner_image: None,
            membership_fee: None,
        }
    }

    #[test]
    fn create_starts_pending_with_defaults() {
        let club = Club::create(new_club(), "manager@example.com").unwrap();

        assert_eq!(club.status, ClubStatus::Pending);
        assert_eq!(club.club_name, "Photography Enthusiasts");
        assert_eq!(club.manager_email, "manager@example.com");
        assert_eq!(club.membership_fee, Money::ZERO);
        assert_eq!(club.banner_image, "");
        assert_eq!(club.member_count, 0);
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let mut fields = new_club();
        fields.location = "   ".to_string();

        let err = Club::create(fields, "m@example.com").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"location".to_string()));
    }

    #[test]
    fn update_applies_present_fields_only() {
        let mut club = Club::create(new_club(), "m@example.com").unwrap();
        club.membership_fee = Money::from_cents(1500).unwrap();

        club.apply_update(ClubUpdate {
            description: Some(String::new()),
            membership_fee: Some(Money::ZERO),
            ..Default::default()
        });

        assert_eq!(club.description, "");
        assert_eq!(club.membership_fee, Money::ZERO);
        assert_eq!(club.club_name, "Photography Enthusiasts");
        assert_eq!(club.location, "Dhaka");
    }

    #[test]
    fn set_status_rejects_pending() {
        let mut club = Club::create(new_club(), "m@example.com").unwrap();
        club.set_status(ClubStatus::Approved).unwrap();
        assert!(club.is_approved());

        let err = club.set_status(ClubStatus::Pending).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert!(club.is_approved());
    }

    #[test]
    fn ownership_follows_manager_email() {
        let club = Club::create(new_club(), "m@example.com").unwrap();
        let owner = AuthenticatedUser::new(UserId::new(), "m@example.com", "M", Role::ClubManager);
        let other = AuthenticatedUser::new(UserId::new(), "x@example.com", "X", Role::ClubManager);

        assert!(club.is_owned_by(&owner));
        assert!(!club.is_owned_by(&other));
    }
}
