use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{Payment, PaymentView};
use crate::ports::PaymentRepository;

use super::{InMemoryStore, StoreState};

impl StoreState {
    fn payment_view(&self, payment: &Payment) -> PaymentView {
        PaymentView {
            payment: payment.clone(),
            club_name: self.clubs.get(&payment.club_id).map(|c| c.club_name.clone()),
            event_title: payment
                .event_id
                .and_then(|id| self.events.get(&id))
                .map(|e| e.title.clone()),
        }
    }

    fn payment_views<'a>(&self, payments: impl Iterator<Item = &'a Payment>) -> Vec<PaymentView> {
        let mut views: Vec<PaymentView> = payments.map(|p| self.payment_view(p)).collect();
        views.sort_by(|a, b| b.payment.created_at.cmp(&a.payment.created_at));
        views
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        self.lock()?.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let stored = state
            .payments
            .get_mut(&payment.id)
            .ok_or_else(|| DomainError::not_found("Payment"))?;
        stored.status = payment.status;
        stored.updated_at = payment.updated_at;
        Ok(())
    }

    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .lock()?
            .payments
            .values()
            .find(|p| p.stripe_payment_intent_id == intent_id)
            .cloned())
    }

    async fn list_for_user(&self, email: &str) -> Result<Vec<PaymentView>, DomainError> {
        let state = self.lock()?;
        Ok(state.payment_views(state.payments.values().filter(|p| p.user_email == email)))
    }

    async fn list_all(&self) -> Result<Vec<PaymentView>, DomainError> {
        let state = self.lock()?;
        Ok(state.payment_views(state.payments.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClubId, Money};
    use crate::domain::payment::PaymentStatus;

    fn payment(email: &str, intent: &str) -> Payment {
        Payment::for_membership(email, ClubId::new(), Money::from_cents(1500).unwrap(), intent)
    }

    #[tokio::test]
    async fn update_persists_status() {
        let store = InMemoryStore::new();
        let mut p = payment("a@x.io", "pi_1");
        store.create(&p).await.unwrap();

        p.transition(PaymentStatus::Succeeded).unwrap();
        store.update(&p).await.unwrap();

        let stored = store.find_by_intent_id("pi_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Succeeded);
    }

    #[tokio::test]
    async fn listings_scope_by_user() {
        let store = InMemoryStore::new();
        store.create(&payment("a@x.io", "pi_1")).await.unwrap();
        store.create(&payment("b@x.io", "pi_2")).await.unwrap();

        let mine = store.list_for_user("a@x.io").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].payment.stripe_payment_intent_id, "pi_1");
        assert!(mine[0].club_name.is_none());
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }
}
