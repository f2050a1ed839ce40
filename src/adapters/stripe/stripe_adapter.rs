//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe REST API. Only
//! PaymentIntents are used: one `POST /v1/payment_intents` per fee and a
//! `GET /v1/payment_intents/:id` when the client asks for confirmation.
//!
//! # Security
//!
//! The secret key is held as `secrecy::SecretString` and only exposed when
//! building the basic-auth header.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CreateIntentRequest, IntentStatus, PaymentError, PaymentErrorCode, PaymentIntent,
    PaymentProvider,
};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base_url)
    }

    /// Turns a Stripe response into an intent or a categorized error.
    async fn read_intent(response: reqwest::Response) -> Result<PaymentIntent, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_response(status, &body));
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        Ok(intent.into())
    }
}

/// Form parameters for `POST /v1/payment_intents`.
fn intent_form(request: &CreateIntentRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("amount".to_string(), request.amount_cents.to_string()),
        ("currency".to_string(), request.currency.clone()),
    ];
    for (key, value) in &request.metadata {
        params.push((format!("metadata[{}]", key), value.clone()));
    }
    params
}

/// Maps a non-2xx Stripe response to a `PaymentError`.
fn map_error_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error ({})", status));

    let code = match status.as_u16() {
        400 | 402 => PaymentErrorCode::InvalidRequest,
        401 | 403 => PaymentErrorCode::AuthenticationError,
        404 => PaymentErrorCode::NotFound,
        429 => PaymentErrorCode::RateLimitExceeded,
        500..=599 => PaymentErrorCode::ProviderError,
        _ => PaymentErrorCode::Unknown,
    };

    let mut error = PaymentError::new(code, message);
    if let Some(provider_code) = parsed.and_then(|b| b.error.code) {
        error = error.with_provider_code(provider_code);
    }
    error
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: CreateIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .http_client
            .post(self.intents_url())
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&intent_form(&request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let intent = Self::read_intent(response).await.map_err(|e| {
            tracing::error!(error = %e, "Stripe create_payment_intent failed");
            e
        })?;

        tracing::info!(
            intent_id = %intent.id,
            amount = intent.amount,
            "Created payment intent"
        );
        Ok(intent)
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/{}", self.intents_url(), intent_id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        Self::read_intent(response).await.map_err(|e| {
            tracing::error!(intent_id = %intent_id, error = %e, "Stripe retrieve_payment_intent failed");
            e
        })
    }
}

/// Subset of Stripe's PaymentIntent object.
#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
    status: IntentStatus,
    amount: i64,
    currency: String,
}

impl From<StripePaymentIntent> for PaymentIntent {
    fn from(intent: StripePaymentIntent) -> Self {
        PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
            amount: intent.amount,
            currency: intent.currency,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    code: Option<String>,
    message: Option<String>,
}
