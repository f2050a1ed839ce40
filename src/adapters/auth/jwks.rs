//! JWKS-backed token verifier.
//!
//! Verifies identity-provider JWTs (Firebase ID tokens in production) by:
//!
//! 1. Fetching the provider's JWKS from the configured URL
//! 2. Validating the JWT signature against the matching public key
//! 3. Validating issuer, audience, and expiry claims
//! 4. Returning the subject and email claims as a `VerifiedToken`
//!
//! Local user lookup is not done here; see the identity resolver.
//!
//! # Example
//!
//! ```ignore
//! let config = JwksConfig::new(
//!     "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com",
//!     "https://securetoken.google.com/clubsphere",
//!     "clubsphere",
//! );
//! let verifier = JwksTokenVerifier::new(config);
//! let token = verifier.verify("eyJ...").await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, VerifiedToken};
use crate::ports::TokenVerifier;

const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(3600);

/// Configuration for the JWKS verifier.
#[derive(Debug, Clone)]
pub struct JwksConfig {
    /// Where the provider publishes its signing keys.
    pub jwks_url: String,

    /// Expected `iss` claim.
    pub issuer: String,

    /// Expected `aud` claim.
    pub audience: String,

    /// How long to cache JWKS before refetching. Defaults to 1 hour.
    pub jwks_cache_duration: Option<Duration>,
}

impl JwksConfig {
    pub fn new(
        jwks_url: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            jwks_cache_duration: None,
        }
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = Some(duration);
        self
    }
}

/// Claims we read from identity tokens.
#[derive(Debug, Serialize, Deserialize)]
struct IdentityClaims {
    sub: String,
    iss: String,

    #[serde(default)]
    aud: Audience,

    exp: i64,

    #[serde(default)]
    email: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Cached JWKS with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

/// Production `TokenVerifier`.
///
/// Keys are fetched lazily on the first verification and cached.
pub struct JwksTokenVerifier {
    config: JwksConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl JwksTokenVerifier {
    pub fn new(config: JwksConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = &self.config.jwks_url;

        tracing::debug!("Fetching JWKS from {}", url);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch JWKS: {}", e);
            AuthError::service_unavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("JWKS endpoint returned {}", status);
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse JWKS: {}", e);
            AuthError::service_unavailable(format!("Failed to parse JWKS: {}", e))
        })?;

        tracing::debug!("Fetched {} keys from JWKS", jwks.keys.len());

        Ok(jwks)
    }

    /// Get JWKS, using cache if available and not expired.
    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            let duration = self
                .config
                .jwks_cache_duration
                .unwrap_or(DEFAULT_CACHE_DURATION);
            *cache = Some(JwksCache::new(jwks.clone(), duration));
        }

        Ok(jwks)
    }

    fn find_decoding_key(
        &self,
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<(DecodingKey, Algorithm), AuthError> {
        let kid = header.kid.as_ref().ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!("No matching key found for kid: {}", kid);
            AuthError::InvalidToken
        })?;

        let algorithm = match jwk.common.key_algorithm {
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) | None => Algorithm::RS256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES384) => Algorithm::ES384,
            Some(other) => {
                tracing::warn!("Unsupported algorithm: {:?}", other);
                return Err(AuthError::InvalidToken);
            }
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!("Failed to create decoding key: {}", e);
            AuthError::InvalidToken
        })?;

        Ok((decoding_key, algorithm))
    }

    fn decode_claims(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<TokenData<IdentityClaims>, AuthError> {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);

        decode::<IdentityClaims>(token, decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!("Token issued for another party: {}", e);
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }

    /// Checks the decoded claims and keeps the ones we use.
    fn to_verified(&self, claims: IdentityClaims) -> Result<VerifiedToken, AuthError> {
        if claims.iss != self.config.issuer || !claims.aud.contains(&self.config.audience) {
            tracing::warn!(iss = %claims.iss, "Issuer or audience mismatch after validation");
            return Err(AuthError::InvalidToken);
        }
        if claims.sub.trim().is_empty() {
            tracing::warn!("Token has an empty subject");
            return Err(AuthError::InvalidToken);
        }

        Ok(VerifiedToken {
            subject: claims.sub,
            email: claims.email.filter(|e| !e.is_empty()),
        })
    }
}

#[async_trait]
impl TokenVerifier for JwksTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode JWT header: {}", e);
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks().await?;
        let (decoding_key, algorithm) = self.find_decoding_key(&header, &jwks)?;
        let token_data = self.decode_claims(token, &decoding_key, algorithm)?;

        self.to_verified(token_data.claims)
    }
}

impl std::fmt::Debug for JwksTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwksTokenVerifier")
            .field("jwks_url", &self.config.jwks_url)
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> JwksTokenVerifier {
        JwksTokenVerifier::new(JwksConfig::new(
            "https://keys.example.com/jwks.json",
            "https://securetoken.google.com/clubsphere",
            "clubsphere",
        ))
    }

    fn claims(iss: &str, aud: Audience, email: Option<&str>) -> IdentityClaims {
        IdentityClaims {
            sub: "firebase-uid-1".to_string(),
            iss: iss.to_string(),
            aud,
            exp: 4_000_000_000,
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn config_with_custom_cache_duration() {
        let config = JwksConfig::new("https://k", "iss", "aud")
            .with_cache_duration(Duration::from_secs(300));
        assert_eq!(config.jwks_cache_duration, Some(Duration::from_secs(300)));
    }

    #[test]
    fn audience_single_and_multiple() {
        assert!(Audience::Single("clubsphere".to_string()).contains("clubsphere"));
        assert!(Audience::Multiple(vec!["a".to_string(), "clubsphere".to_string()])
            .contains("clubsphere"));
        assert!(!Audience::None.contains("clubsphere"));
    }

    #[test]
    fn verified_claims_keep_subject_and_email() {
        let verified = verifier()
            .to_verified(claims(
                "https://securetoken.google.com/clubsphere",
                Audience::Single("clubsphere".to_string()),
                Some("member@clubsphere.com"),
            ))
            .unwrap();

        assert_eq!(verified.subject, "firebase-uid-1");
        assert_eq!(verified.email.as_deref(), Some("member@clubsphere.com"));
    }

    #[test]
    fn empty_email_claim_is_dropped() {
        let verified = verifier()
            .to_verified(claims(
                "https://securetoken.google.com/clubsphere",
                Audience::Single("clubsphere".to_string()),
                Some(""),
            ))
            .unwrap();
        assert!(verified.email.is_none());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let result = verifier().to_verified(claims(
            "https://evil.example.com",
            Audience::Single("clubsphere".to_string()),
            None,
        ));
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn jwks_cache_expires_after_duration() {
        let cache = JwksCache::new(JwkSet { keys: vec![] }, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.is_expired());
    }

    #[tokio::test]
    async fn malformed_token_is_invalid_without_fetching_keys() {
        let result = verifier().verify("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn verifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwksTokenVerifier>();
    }
}
