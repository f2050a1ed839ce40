//! Listing criteria and read projections for events.

use serde::{Deserialize, Serialize};

use crate::domain::club::ClubSummary;
use crate::domain::foundation::{PageRequest, SortOrder};

use super::Event;

/// Columns a public event listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSortField {
    #[default]
    EventDate,
    Title,
    CreatedAt,
    EventFee,
    CurrentAttendees,
}

impl EventSortField {
    pub fn as_column(&self) -> &'static str {
        match self {
            EventSortField::EventDate => "event_date",
            EventSortField::Title => "title",
            EventSortField::CreatedAt => "created_at",
            EventSortField::EventFee => "event_fee_cents",
            EventSortField::CurrentAttendees => "current_attendees",
        }
    }
}

/// Criteria for the public event listing. Only events of approved clubs are
/// ever listed.
#[derive(Debug, Clone)]
pub struct EventQuery {
    /// Case-insensitive substring of the event title.
    pub search: Option<String>,
    pub sort: EventSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: EventSortField::EventDate,
            order: SortOrder::Asc,
            page: PageRequest::default(),
        }
    }
}

impl EventQuery {
    /// Title filter only; the approved-club restriction is applied by the
    /// repository.
    pub fn matches_title(&self, event: &Event) -> bool {
        match &self.search {
            Some(term) => event.title.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// An event together with the club that hosts it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWithClub {
    pub event: Event,
    pub club: ClubSummary,
}
