use async_trait::async_trait;

use crate::domain::event::{Event, EventQuery, EventRegistration, EventSortField, EventWithClub};
use crate::domain::foundation::{DomainError, EventId, Page, Timestamp};
use crate::ports::EventRepository;

use super::{directed, paginate, InMemoryStore, StoreState};

fn compare(a: &Event, b: &Event, field: EventSortField) -> std::cmp::Ordering {
    match field {
        EventSortField::EventDate => a.event_date.cmp(&b.event_date),
        EventSortField::Title => a.title.cmp(&b.title),
        EventSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        EventSortField::EventFee => a.event_fee.cmp(&b.event_fee),
        EventSortField::CurrentAttendees => a.current_attendees.cmp(&b.current_attendees),
    }
}

impl StoreState {
    fn with_club(&self, event: &Event) -> Option<EventWithClub> {
        self.club_summary(&event.club_id).map(|club| EventWithClub {
            event: event.clone(),
            club,
        })
    }

    fn public_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events
            .values()
            .filter(|e| self.is_club_approved(&e.club_id))
    }

    fn recount(&mut self, event_id: &EventId) -> u32 {
        let count = self.count_registered(event_id);
        if let Some(event) = self.events.get_mut(event_id) {
            event.current_attendees = count;
        }
        count
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, event: &Event) -> Result<(), DomainError> {
        self.lock()?.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let stored = state
            .events
            .get_mut(&event.id)
            .ok_or_else(|| DomainError::not_found("Event"))?;
        let current_attendees = stored.current_attendees;
        *stored = Event {
            current_attendees,
            ..event.clone()
        };
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.lock()?.events.get(id).cloned())
    }

    async fn find_with_club(&self, id: &EventId) -> Result<Option<EventWithClub>, DomainError> {
        let state = self.lock()?;
        Ok(state.events.get(id).and_then(|e| state.with_club(e)))
    }

    async fn list_public(&self, query: &EventQuery) -> Result<Page<EventWithClub>, DomainError> {
        let state = self.lock()?;
        let mut events: Vec<&Event> = state
            .public_events()
            .filter(|e| query.matches_title(e))
            .collect();
        events.sort_by(|a, b| {
            directed(compare(a, b, query.sort), query.order).then_with(|| a.id.cmp(&b.id))
        });
        let joined = events
            .into_iter()
            .filter_map(|e| state.with_club(e))
            .collect();
        Ok(paginate(joined, query.page))
    }

    async fn list_upcoming(
        &self,
        now: Timestamp,
        limit: usize,
    ) -> Result<Vec<EventWithClub>, DomainError> {
        let state = self.lock()?;
        let mut events: Vec<&Event> = state
            .public_events()
            .filter(|e| !e.event_date.is_before(&now))
            .collect();
        events.sort_by(|a, b| a.event_date.cmp(&b.event_date));
        Ok(events
            .into_iter()
            .take(limit)
            .filter_map(|e| state.with_club(e))
            .collect())
    }

    async fn list_by_manager(&self, email: &str) -> Result<Vec<EventWithClub>, DomainError> {
        let state = self.lock()?;
        let mut events: Vec<&Event> = state
            .events
            .values()
            .filter(|e| {
                state
                    .clubs
                    .get(&e.club_id)
                    .is_some_and(|c| c.manager_email == email)
            })
            .collect();
        events.sort_by(|a, b| b.event_date.cmp(&a.event_date));
        Ok(events
            .into_iter()
            .filter_map(|e| state.with_club(e))
            .collect())
    }

    async fn delete(&self, id: &EventId) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        if state.events.remove(id).is_none() {
            return Ok(false);
        }
        state.registrations.retain(|r| r.event_id != *id);
        Ok(true)
    }

    async fn register(&self, registration: &EventRegistration) -> Result<u32, DomainError> {
        let mut state = self.lock()?;
        let event = state
            .events
            .get(&registration.event_id)
            .ok_or_else(|| DomainError::not_found("Event"))?;

        let registered = state.count_registered(&registration.event_id);
        if event.is_full(registered) {
            return Err(DomainError::capacity("Event is full"));
        }

        let duplicate = state.registrations.iter().any(|r| {
            r.event_id == registration.event_id && r.user_email == registration.user_email
        });
        if duplicate {
            return Err(DomainError::conflict(
                "You are already registered for this event",
            ));
        }

        state.registrations.push(registration.clone());
        Ok(state.recount(&registration.event_id))
    }

    async fn unregister(
        &self,
        event_id: &EventId,
        email: &str,
    ) -> Result<Option<u32>, DomainError> {
        let mut state = self.lock()?;
        let before = state.registrations.len();
        state
            .registrations
            .retain(|r| !(r.event_id == *event_id && r.user_email == email));
        if state.registrations.len() == before {
            return Ok(None);
        }
        Ok(Some(state.recount(event_id)))
    }

    async fn find_registration(
        &self,
        event_id: &EventId,
        email: &str,
    ) -> Result<Option<EventRegistration>, DomainError> {
        Ok(self
            .lock()?
            .registrations
            .iter()
            .find(|r| r.event_id == *event_id && r.user_email == email)
            .cloned())
    }

    async fn count_registered(&self, event_id: &EventId) -> Result<u32, DomainError> {
        Ok(self.lock()?.count_registered(event_id))
    }
}
