//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: SecretString,

    /// Lowercase ISO currency for every intent
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Override for the Stripe API base URL (local stubs)
    pub stripe_api_base: Option<String>,
}

impl PaymentConfig {
    pub fn new(stripe_api_key: impl Into<String>) -> Self {
        Self {
            stripe_api_key: SecretString::new(stripe_api_key.into()),
            currency: default_currency(),
            stripe_api_base: None,
        }
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.stripe_api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if !key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

fn default_currency() -> String {
    "usd".to_string()
}
