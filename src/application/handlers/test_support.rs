//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::stripe::MockPaymentProvider;
use crate::domain::club::{Club, ClubCategory, ClubStatus, NewClub};
use crate::domain::event::{Event, NewEvent};
use crate::domain::foundation::{AuthenticatedUser, Money, Role, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{ClubRepository, EventRepository, UserRepository};

pub const MANAGER_EMAIL: &str = "manager@example.com";
pub const OTHER_MANAGER_EMAIL: &str = "other-manager@example.com";

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(), "admin@example.com", "Admin", Role::Admin)
}

pub fn manager() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(), MANAGER_EMAIL, "Manager", Role::ClubManager)
}

pub fn other_manager() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(), OTHER_MANAGER_EMAIL, "Other", Role::ClubManager)
}

pub fn member(email: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(), email, "Member", Role::Member)
}

pub fn new_club(name: &str) -> NewClub {
    NewClub {
        club_name: name.to_string(),
        description: "A club".to_string(),
        category: ClubCategory::Photography,
        location: "Dhaka".to_string(),
        banner_image: None,
        membership_fee: None,
    }
}

pub fn new_event(club: &Club, days_from_now: i64, max_attendees: Option<u32>) -> NewEvent {
    NewEvent {
        club_id: club.id,
        title: "Meetup".to_string(),
        description: "Monthly meetup".to_string(),
        event_date: Timestamp::now().add_days(days_from_now),
        location: "Hall A".to_string(),
        is_paid: None,
        event_fee: None,
        max_attendees,
    }
}

pub async fn seed_club(store: &InMemoryStore, fee_cents: i64, status: ClubStatus) -> Club {
    let mut club = Club::create(new_club("Photography Enthusiasts"), MANAGER_EMAIL).unwrap();
    club.membership_fee = Money::from_cents(fee_cents).unwrap();
    club.status = status;
    ClubRepository::create(store, &club).await.unwrap();
    club
}

pub async fn seed_event(store: &InMemoryStore, club: &Club, days: i64, max: Option<u32>) -> Event {
    let event = Event::create(new_event(club, days, max)).unwrap();
    EventRepository::create(store, &event).await.unwrap();
    event
}

pub async fn seed_user(store: &InMemoryStore, email: &str, uid: &str, role: Role) -> User {
    let mut user = User::register("Seeded", email, None, uid).unwrap();
    user.role = role;
    UserRepository::create(store, &user).await.unwrap();
    user
}

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

pub fn provider() -> Arc<MockPaymentProvider> {
    Arc::new(MockPaymentProvider::new())
}
