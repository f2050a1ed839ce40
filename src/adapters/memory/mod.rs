//! In-memory persistence adapter.
//!
//! One `InMemoryStore` implements every repository port over a single
//! mutex-guarded state, so each port call is one critical section. That
//! gives the same atomicity the PostgreSQL adapter gets from transactions:
//! registration capacity, uniqueness pairs and counter updates cannot
//! interleave.
//!
//! Used by the test suite and by `database.backend = "memory"` for local runs.
//! Data does not survive a restart.

mod clubs;
mod events;
mod memberships;
mod payments;
mod users;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::club::{Club, ClubSummary};
use crate::domain::event::{Event, EventRegistration};
use crate::domain::foundation::{
    ClubId, DomainError, EventId, Page, PageRequest, PaymentId, SortOrder, UserId,
};
use crate::domain::membership::Membership;
use crate::domain::payment::Payment;
use crate::domain::user::User;

/// In-memory implementation of every repository port.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let clubs: Arc<dyn ClubRepository> = store.clone();
/// let events: Arc<dyn EventRepository> = store;
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    clubs: HashMap<ClubId, Club>,
    events: HashMap<EventId, Event>,
    registrations: Vec<EventRegistration>,
    memberships: Vec<Membership>,
    payments: HashMap<PaymentId, Payment>,

    /// Error returned by the next call, for exercising failure paths.
    next_error: Option<DomainError>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next repository call fail with `error`.
    pub fn fail_next(&self, error: DomainError) {
        if let Ok(mut state) = self.state.lock() {
            state.next_error = Some(error);
        }
    }

    /// Locks the state, surfacing an injected failure if one is pending.
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, DomainError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| DomainError::internal("In-memory store lock poisoned"))?;
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        Ok(state)
    }
}

impl StoreState {
    fn club_summary(&self, id: &ClubId) -> Option<ClubSummary> {
        self.clubs.get(id).map(ClubSummary::from)
    }

    fn is_club_approved(&self, id: &ClubId) -> bool {
        self.clubs.get(id).map(Club::is_approved).unwrap_or(false)
    }

    fn count_registered(&self, event_id: &EventId) -> u32 {
        let count = self
            .registrations
            .iter()
            .filter(|r| r.event_id == *event_id && r.is_active())
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

/// Applies `order` to an ascending comparison.
fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Slices an already filtered and sorted list into one page.
fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let page_items = items
        .into_iter()
        .skip(offset)
        .take(request.limit() as usize)
        .collect();
    Page::new(page_items, total, request)
}
