//! Shared fixtures for unit tests: RSA signing keys under `testdata/`, a
//! key source that never touches the network, and token builders.
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::config::{AuthSettings, default_jwks_url};
use crate::services::auth::error::KeySetError;
use crate::services::auth::{AuthService, KeySource};

pub const ISSUER: &str = "https://casting-agency.test/";
pub const AUDIENCE: &str = "casting-agency";
pub const SUBJECT: &str = "auth0|casting-director";
pub const TRUSTED_KID: &str = "test-key-1";
pub const ROTATED_KID: &str = "test-key-2";

pub enum SigningKey {
    Trusted,
    Rotated,
    Untrusted,
}

pub fn trusted_jwks() -> JwkSet {
    serde_json::from_str(include_str!("../testdata/jwks_trusted.json")).unwrap()
}

pub fn rotated_jwks() -> JwkSet {
    serde_json::from_str(include_str!("../testdata/jwks_rotated.json")).unwrap()
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn claims(permissions: &[&str]) -> serde_json::Value {
    let now = now();
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": SUBJECT,
        "iat": now,
        "exp": now + 3600,
        "permissions": permissions,
    })
}

pub fn sign(claims: &serde_json::Value, key: SigningKey, kid: Option<&str>) -> String {
    let pem = match key {
        SigningKey::Trusted => include_str!("../testdata/trusted_rsa_private.pem"),
        SigningKey::Rotated => include_str!("../testdata/rotated_rsa_private.pem"),
        SigningKey::Untrusted => include_str!("../testdata/untrusted_rsa_private.pem"),
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);

    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}

/// A token signed by the trusted key carrying `permissions`.
pub fn token(permissions: &[&str]) -> String {
    sign(&claims(permissions), SigningKey::Trusted, Some(TRUSTED_KID))
}

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        issuer: ISSUER.to_string(),
        audience: AUDIENCE.to_string(),
        jwks_url: default_jwks_url(ISSUER).unwrap(),
        jwks_fetch_timeout: Duration::from_secs(1),
        jwks_min_refresh_interval: Duration::ZERO,
        leeway_seconds: 0,
    }
}

pub fn auth_service(source: Arc<StaticKeySource>) -> Arc<AuthService> {
    Arc::new(AuthService::new(&auth_settings(), source))
}

/// Serves a fixed key set and counts how often it was asked.
pub struct StaticKeySource {
    set: Mutex<JwkSet>,
    fetches: AtomicUsize,
    unavailable: AtomicBool,
}

impl StaticKeySource {
    pub fn new(set: JwkSet) -> Self {
        Self {
            set: Mutex::new(set),
            fetches: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn replace(&self, set: JwkSet) {
        *self.set.lock().unwrap() = set;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KeySetError::Parse("key endpoint unavailable".to_string()));
        }
        Ok(self.set.lock().unwrap().clone())
    }
}
