//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{Payment, PaymentView};

/// Persistence for local payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Persist status and `updated_at`.
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Payment>, DomainError>;

    /// The user's payments with club name and event title, newest first.
    async fn list_for_user(&self, email: &str) -> Result<Vec<PaymentView>, DomainError>;

    /// Every payment with club name and event title, newest first.
    async fn list_all(&self) -> Result<Vec<PaymentView>, DomainError>;
}
