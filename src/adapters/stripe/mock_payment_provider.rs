//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Per-intent status control
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{
    CreateIntentRequest, IntentStatus, PaymentError, PaymentIntent, PaymentProvider,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// let intent = mock.create_payment_intent(request).await?;
///
/// // Simulate the client completing the payment
/// mock.set_intent_status(&intent.id, IntentStatus::Succeeded);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Created intents by ID.
    intents: HashMap<String, PaymentIntent>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Every create request, in order.
    created: Vec<CreateIntentRequest>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    sequence: u64,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overwrite the status of a known intent, or register an unknown one.
    pub fn set_intent_status(&self, intent_id: &str, status: IntentStatus) {
        let mut state = self.state();
        state
            .intents
            .entry(intent_id.to_string())
            .and_modify(|intent| intent.status = status)
            .or_insert_with(|| PaymentIntent {
                id: intent_id.to_string(),
                client_secret: None,
                status,
                amount: 0,
                currency: "usd".to_string(),
            });
    }

    /// Set an error to return on the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Requests passed to `create_payment_intent`, in order.
    pub fn created_requests(&self) -> Vec<CreateIntentRequest> {
        self.state().created.clone()
    }

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record(state: &mut MockState, method: &str, args: Vec<String>) -> Result<(), PaymentError> {
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
        match state.next_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: CreateIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut state = self.state();
        Self::record(
            &mut state,
            "create_payment_intent",
            vec![request.amount_cents.to_string(), request.currency.clone()],
        )?;

        state.sequence += 1;
        let id = format!("pi_mock_{}", state.sequence);
        let intent = PaymentIntent {
            id: id.clone(),
            client_secret: Some(format!("{}_secret_mock", id)),
            status: IntentStatus::RequiresPaymentMethod,
            amount: request.amount_cents,
            currency: request.currency.clone(),
        };

        state.created.push(request);
        state.intents.insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let mut state = self.state();
        Self::record(&mut state, "retrieve_payment_intent", vec![intent_id.to_string()])?;

        state
            .intents
            .get(intent_id)
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Payment intent"))
    }
}
