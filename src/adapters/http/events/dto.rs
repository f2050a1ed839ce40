//! HTTP DTOs for event endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::clubs::ClubSummaryResponse;
use crate::adapters::http::params::{
    deserialize_amount, deserialize_some, money, non_blank, parse_event_date, parse_id,
};
use crate::domain::event::{
    Event, EventQuery, EventRegistration, EventSortField, EventUpdate, EventWithClub, NewEvent,
    RegistrationStatus,
};
use crate::domain::foundation::{
    ClubId, DomainError, EventId, Money, PageRequest, RegistrationId, SortOrder, Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create an event. Missing text fields reach domain validation
/// as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub club_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: Option<String>,
    #[serde(default)]
    pub location: String,
    pub is_paid: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub event_fee: Option<f64>,
    pub max_attendees: Option<u32>,
}

impl CreateEventRequest {
    pub fn into_new_event(self) -> Result<NewEvent, DomainError> {
        if self.club_id.trim().is_empty() {
            return Err(DomainError::validation("clubId", "clubId is required"));
        }
        let event_date = match self.event_date.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(DomainError::validation("eventDate", "eventDate is required"))
            }
            Some(raw) => parse_event_date(raw)?,
        };

        Ok(NewEvent {
            club_id: parse_id(&self.club_id, "Club")?,
            title: self.title,
            description: self.description,
            event_date,
            location: self.location,
            is_paid: self.is_paid,
            event_fee: money("eventFee", self.event_fee)?,
            max_attendees: self.max_attendees,
        })
    }
}

/// Partial event update. `maxAttendees: null` removes the limit; leaving the
/// field out keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub is_paid: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub event_fee: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub max_attendees: Option<Option<u32>>,
}

impl UpdateEventRequest {
    pub fn into_update(self) -> Result<EventUpdate, DomainError> {
        let event_date = non_blank(self.event_date)
            .map(|raw| parse_event_date(&raw))
            .transpose()?;

        Ok(EventUpdate {
            title: self.title,
            description: self.description,
            event_date,
            location: self.location,
            is_paid: self.is_paid,
            event_fee: money("eventFee", self.event_fee)?,
            max_attendees: self.max_attendees,
        })
    }
}

/// Optional body of an event registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub payment_id: Option<String>,
}

/// Query string of the public listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListParams {
    pub search: Option<String>,
    pub sort: Option<EventSortField>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl EventListParams {
    pub fn into_query(self) -> EventQuery {
        let defaults = EventQuery::default();
        EventQuery {
            search: non_blank(self.search),
            sort: self.sort.unwrap_or(defaults.sort),
            order: self.order.unwrap_or(defaults.order),
            page: PageRequest::new(self.page, self.limit),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub club_id: ClubId,
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: String,
    pub is_paid: bool,
    pub event_fee: Money,
    pub max_attendees: Option<u32>,
    pub current_attendees: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Hosting club, present on reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubSummaryResponse>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            club_id: event.club_id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            is_paid: event.is_paid,
            event_fee: event.event_fee,
            max_attendees: event.max_attendees,
            current_attendees: event.current_attendees,
            created_at: event.created_at,
            updated_at: event.updated_at,
            club: None,
        }
    }
}

impl From<EventWithClub> for EventResponse {
    fn from(view: EventWithClub) -> Self {
        Self {
            club: Some(view.club.into()),
            ..view.event.into()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_email: String,
    pub club_id: ClubId,
    pub status: RegistrationStatus,
    pub payment_id: Option<String>,
    pub created_at: Timestamp,
}

impl From<EventRegistration> for RegistrationResponse {
    fn from(registration: EventRegistration) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            user_email: registration.user_email,
            club_id: registration.club_id,
            status: registration.status,
            payment_id: registration.payment_id,
            created_at: registration.created_at,
        }
    }
}

/// `{message, event}` returned by event mutations.
#[derive(Debug, Clone, Serialize)]
pub struct EventMessageResponse {
    pub message: String,
    pub event: EventResponse,
}

impl EventMessageResponse {
    pub fn new(message: impl Into<String>, event: Event) -> Self {
        Self {
            message: message.into(),
            event: event.into(),
        }
    }
}

/// `{message, registration}` returned by a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationMessageResponse {
    pub message: String,
    pub registration: RegistrationResponse,
}

pub fn event_list(events: Vec<EventWithClub>) -> Vec<EventResponse> {
    events.into_iter().map(EventResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn create_request() -> CreateEventRequest {
        CreateEventRequest {
            club_id: ClubId::new().to_string(),
            title: "Night Walk".to_string(),
            description: "Photos after dark".to_string(),
            event_date: Some("2030-01-15T19:00".to_string()),
            location: "Old Town".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_request_requires_club_and_date() {
        let mut no_club = create_request();
        no_club.club_id = String::new();
        let mut no_date = create_request();
        no_date.event_date = None;

        assert_eq!(no_club.into_new_event().unwrap_err().message(), "clubId is required");
        assert_eq!(no_date.into_new_event().unwrap_err().message(), "eventDate is required");
    }

    #[test]
    fn malformed_club_id_reads_as_missing_club() {
        let mut request = create_request();
        request.club_id = "abc".to_string();

        let err = request.into_new_event().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn update_distinguishes_null_from_absent_limit() {
        let absent: UpdateEventRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        let null: UpdateEventRequest = serde_json::from_str(r#"{"maxAttendees":null}"#).unwrap();

        assert_eq!(absent.into_update().unwrap().max_attendees, None);
        assert_eq!(null.into_update().unwrap().max_attendees, Some(None));
    }

    #[test]
    fn listing_defaults_to_date_ascending() {
        let query = EventListParams::default().into_query();
        assert_eq!(query.sort, EventSortField::EventDate);
        assert_eq!(query.order, SortOrder::Asc);
    }
}
