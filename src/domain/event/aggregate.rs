//! Event aggregate entity.
//!
//! # Invariants
//!
//! - `event_fee` is zero whenever `is_paid` is false
//! - `max_attendees`, when set, is at least 1
//! - `current_attendees` is a cached count of `registered` rows, recomputed
//!   by the persistence layer after every register/unregister

use crate::domain::foundation::{ClubId, DomainError, EventId, Money, Timestamp};

/// A scheduled activity hosted by a club.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub club_id: ClubId,
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: String,
    pub is_paid: bool,
    pub event_fee: Money,

    /// `None` means unlimited.
    pub max_attendees: Option<u32>,

    pub current_attendees: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields a manager supplies when creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub club_id: ClubId,
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: String,
    pub is_paid: Option<bool>,
    pub event_fee: Option<Money>,
    pub max_attendees: Option<u32>,
}

/// Partial update; `None` leaves the field unchanged.
///
/// `max_attendees` distinguishes "not sent" (`None`) from "sent as null"
/// (`Some(None)`), the latter removing the limit.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub location: Option<String>,
    pub is_paid: Option<bool>,
    pub event_fee: Option<Money>,
    pub max_attendees: Option<Option<u32>>,
}

impl Event {
    pub fn create(fields: NewEvent) -> Result<Self, DomainError> {
        let title = fields.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title", "title is required"));
        }
        if fields.description.trim().is_empty() {
            return Err(DomainError::validation("description", "description is required"));
        }
        if fields.location.trim().is_empty() {
            return Err(DomainError::validation("location", "location is required"));
        }
        validate_max_attendees(fields.max_attendees)?;

        let is_paid = fields.is_paid.unwrap_or(false);
        let event_fee = if is_paid {
            fields.event_fee.unwrap_or(Money::ZERO)
        } else {
            Money::ZERO
        };

        let now = Timestamp::now();
        Ok(Self {
            id: EventId::new(),
            club_id: fields.club_id,
            title,
            description: fields.description,
            event_date: fields.event_date,
            location: fields.location,
            is_paid,
            event_fee,
            max_attendees: fields.max_attendees,
            current_attendees: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies every field present in `update`. The fee is forced to zero
    /// whenever the resulting event is free.
    pub fn apply_update(&mut self, update: EventUpdate) -> Result<(), DomainError> {
        if let Some(max) = update.max_attendees {
            validate_max_attendees(max)?;
            self.max_attendees = max;
        }
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(event_date) = update.event_date {
            self.event_date = event_date;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(is_paid) = update.is_paid {
            self.is_paid = is_paid;
        }
        if !self.is_paid {
            self.event_fee = Money::ZERO;
        } else if let Some(fee) = update.event_fee {
            self.event_fee = fee;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns true once the event date has passed `now`.
    pub fn has_started(&self, now: Timestamp) -> bool {
        self.event_date.is_before(&now)
    }

    /// Returns true when `registered` more attendees would exceed the limit.
    pub fn is_full(&self, registered: u32) -> bool {
        matches!(self.max_attendees, Some(max) if registered >= max)
    }

    pub fn requires_payment(&self) -> bool {
        self.is_paid && !self.event_fee.is_zero()
    }
}

fn validate_max_attendees(max: Option<u32>) -> Result<(), DomainError> {
    if max == Some(0) {
        return Err(DomainError::validation(
            "maxAttendees",
            "maxAttendees must be at least 1",
        ));
    }
    Ok(())
}
