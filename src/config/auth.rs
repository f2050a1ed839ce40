//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (identity-provider JWTs)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// URL of the provider's published signing keys
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,

    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    pub audience: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the key URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwks_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWKS_URL"));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }

        if *environment == Environment::Production && !self.jwks_url.starts_with("https://") {
            return Err(ValidationError::JwksUrlMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwks_url: default_jwks_url(),
            issuer: String::new(),
            audience: String::new(),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_jwks_url() -> String {
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com"
        .to_string()
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            issuer: "https://securetoken.google.com/clubsphere".to_string(),
            audience: "clubsphere".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwks_cache_ttl_secs, 3600);
        assert!(config.jwks_url.starts_with("https://"));
    }

    #[test]
    fn test_jwks_cache_ttl_duration() {
        let config = AuthConfig {
            jwks_cache_ttl_secs: 7200,
            ..Default::default()
        };
        assert_eq!(config.jwks_cache_ttl(), Duration::from_secs(7200));
    }

    #[test]
    fn test_validation_missing_issuer() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_audience() {
        let config = AuthConfig {
            audience: String::new(),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            jwks_url: "http://localhost:9099/keys".to_string(),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate(&Environment::Production).is_ok());
    }
}
