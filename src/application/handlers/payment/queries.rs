//! Read-side payment queries.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::payment::PaymentView;
use crate::ports::PaymentRepository;

pub struct PaymentQueryHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentQueryHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    /// The caller's own payments, newest first.
    pub async fn mine(&self, user: &AuthenticatedUser) -> Result<Vec<PaymentView>, DomainError> {
        self.payments.list_for_user(&user.email).await
    }

    /// Every payment in the system. Admins only.
    pub async fn all(&self, user: &AuthenticatedUser) -> Result<Vec<PaymentView>, DomainError> {
        if !user.is_admin() {
            return Err(DomainError::forbidden("Admin access required"));
        }
        self.payments.list_all().await
    }
}
