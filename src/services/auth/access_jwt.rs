use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AuthSettings;
use crate::services::auth::error::AuthError;
use crate::services::auth::jwks::{KeySetCache, KeySource};

/// Access token (JWT) claims.
///
/// NOTE:
/// - `iss` / `aud` are validated by `Validation` on the raw claims and not kept here.
/// - `permissions` stays optional so a token without the claim can be told apart
///   from one that lacks a single permission.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// RS256 access-token verifier backed by the identity provider's key set.
pub struct AuthService {
    keys: KeySetCache,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .field("keys", &self.keys)
            .finish()
    }
}

impl AuthService {
    pub fn new(settings: &AuthSettings, source: Arc<dyn KeySource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = settings.leeway_seconds;

        Self {
            keys: KeySetCache::new(source, settings.jwks_min_refresh_interval),
            validation,
        }
    }

    /// Verify signature and standard claims of a compact JWS.
    ///
    /// `jsonwebtoken::Validation` checks:
    /// - signature (RS256 only)
    /// - `exp` with the configured leeway
    /// - `iss` and `aud` (because we set them)
    pub async fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            debug!(error = %e, "undecodable token header");
            AuthError::InvalidHeader("Authorization malformed.")
        })?;

        let kid = header
            .kid
            .ok_or(AuthError::InvalidHeader("Authorization malformed."))?;

        let jwk = self
            .keys
            .find(&kid)
            .await?
            .ok_or(AuthError::InvalidHeader("Unable to find the appropriate key."))?;

        let key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            warn!(error = %e, kid = %kid, "unusable key in signing key set");
            AuthError::InvalidHeader("Unable to find the appropriate key.")
        })?;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &self.validation)
            .map_err(classify)?;

        Ok(data.claims)
    }
}

fn classify(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidSignature => AuthError::InvalidToken,
        _ => {
            debug!(error = %e, "token could not be decoded");
            AuthError::InvalidHeader("Unable to parse authentication token.")
        }
    }
}
