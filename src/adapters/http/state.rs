//! Shared application state for every HTTP handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresClubRepository, PostgresEventRepository, PostgresMembershipRepository,
    PostgresPaymentRepository, PostgresUserRepository,
};
use crate::application::{
    ChangeUserRoleHandler, ClubQueryHandler, ConfirmPaymentHandler, CreateClubHandler,
    CreateEventHandler, CreateEventPaymentHandler, CreateMembershipPaymentHandler,
    DeleteEventHandler, DeleteUserHandler, EventQueryHandler, JoinClubHandler,
    MembershipQueryHandler, PaymentQueryHandler, RegisterForEventHandler, RegisterUserHandler,
    SetClubStatusHandler, UnregisterFromEventHandler, UpdateClubHandler, UpdateEventHandler,
    UserQueryHandler,
};
use crate::ports::{
    ClubRepository, EventRepository, MembershipRepository, PaymentProvider, PaymentRepository,
    SessionValidator, UserRepository,
};

/// The five repository ports, backed by one storage engine.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub clubs: Arc<dyn ClubRepository>,
    pub events: Arc<dyn EventRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            clubs: Arc::new(PostgresClubRepository::new(pool.clone())),
            events: Arc::new(PostgresEventRepository::new(pool.clone())),
            memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
            payments: Arc::new(PostgresPaymentRepository::new(pool)),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            clubs: store.clone(),
            events: store.clone(),
            memberships: store.clone(),
            payments: store,
        }
    }
}

/// Cloned into every request; holds Arc-wrapped ports and builds handlers
/// on demand.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub session_validator: Arc<dyn SessionValidator>,

    /// Currency for every payment intent.
    pub currency: String,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        payment_provider: Arc<dyn PaymentProvider>,
        session_validator: Arc<dyn SessionValidator>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            payment_provider,
            session_validator,
            currency: currency.into(),
        }
    }

    // Users

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.repos.users.clone())
    }

    pub fn change_user_role_handler(&self) -> ChangeUserRoleHandler {
        ChangeUserRoleHandler::new(self.repos.users.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.repos.users.clone())
    }

    pub fn user_queries(&self) -> UserQueryHandler {
        UserQueryHandler::new(self.repos.users.clone())
    }

    // Clubs

    pub fn create_club_handler(&self) -> CreateClubHandler {
        CreateClubHandler::new(self.repos.clubs.clone())
    }

    pub fn update_club_handler(&self) -> UpdateClubHandler {
        UpdateClubHandler::new(self.repos.clubs.clone())
    }

    pub fn set_club_status_handler(&self) -> SetClubStatusHandler {
        SetClubStatusHandler::new(self.repos.clubs.clone())
    }

    pub fn club_queries(&self) -> ClubQueryHandler {
        ClubQueryHandler::new(self.repos.clubs.clone())
    }

    // Events

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(self.repos.clubs.clone(), self.repos.events.clone())
    }

    pub fn update_event_handler(&self) -> UpdateEventHandler {
        UpdateEventHandler::new(self.repos.clubs.clone(), self.repos.events.clone())
    }

    pub fn delete_event_handler(&self) -> DeleteEventHandler {
        DeleteEventHandler::new(self.repos.clubs.clone(), self.repos.events.clone())
    }

    pub fn register_for_event_handler(&self) -> RegisterForEventHandler {
        RegisterForEventHandler::new(self.repos.events.clone())
    }

    pub fn unregister_from_event_handler(&self) -> UnregisterFromEventHandler {
        UnregisterFromEventHandler::new(self.repos.events.clone())
    }

    pub fn event_queries(&self) -> EventQueryHandler {
        EventQueryHandler::new(self.repos.events.clone())
    }

    // Memberships

    pub fn join_club_handler(&self) -> JoinClubHandler {
        JoinClubHandler::new(self.repos.clubs.clone(), self.repos.memberships.clone())
    }

    pub fn membership_queries(&self) -> MembershipQueryHandler {
        MembershipQueryHandler::new(self.repos.clubs.clone(), self.repos.memberships.clone())
    }

    // Payments

    pub fn create_membership_payment_handler(&self) -> CreateMembershipPaymentHandler {
        CreateMembershipPaymentHandler::new(
            self.repos.clubs.clone(),
            self.repos.payments.clone(),
            self.payment_provider.clone(),
            self.currency.clone(),
        )
    }

    pub fn create_event_payment_handler(&self) -> CreateEventPaymentHandler {
        CreateEventPaymentHandler::new(
            self.repos.clubs.clone(),
            self.repos.events.clone(),
            self.repos.payments.clone(),
            self.payment_provider.clone(),
            self.currency.clone(),
        )
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(self.repos.payments.clone(), self.payment_provider.clone())
    }

    pub fn payment_queries(&self) -> PaymentQueryHandler {
        PaymentQueryHandler::new(self.repos.payments.clone())
    }
}
