//! Signing key set (JWKS) cache.
//!
//! The identity provider publishes its public keys at a well-known URL. Keys
//! are looked up by `kid`; a miss triggers a refresh so a rotated key is
//! picked up without a redeploy.
//!
//! Concurrency:
//! - readers share a `RwLock` over the current set.
//! - refreshes are serialized by `refresh_gate`; a waiter re-checks the cache
//!   after acquiring it, so concurrent misses for the same key coalesce into
//!   one fetch.
//! - `min_refresh_interval` bounds how often unknown `kid`s can hit the
//!   network. It is also the worst-case delay before a newly rotated `kid`
//!   is accepted: a token signed with it inside the window after another
//!   refresh is rejected until the window elapses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::services::auth::error::KeySetError;

/// Where the key set comes from. The HTTP implementation is used in
/// production; tests substitute a static one.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, KeySetError>;
}

/// Fetches the key set over HTTPS with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpKeySource {
    client: reqwest::Client,
    url: Url,
}

impl HttpKeySource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("casting-agency/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(KeySetError::Status(response.status()));
        }

        let set: JwkSet = response.json().await?;
        if set.keys.is_empty() {
            return Err(KeySetError::Parse("key set contains no keys".to_string()));
        }

        Ok(set)
    }
}

pub struct KeySetCache {
    source: Arc<dyn KeySource>,
    current: RwLock<Option<Arc<JwkSet>>>,
    // Holds the instant of the last successful refresh.
    refresh_gate: Mutex<Option<Instant>>,
    min_refresh_interval: Duration,
}

impl std::fmt::Debug for KeySetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySetCache")
            .field("min_refresh_interval", &self.min_refresh_interval)
            .finish_non_exhaustive()
    }
}

impl KeySetCache {
    pub fn new(source: Arc<dyn KeySource>, min_refresh_interval: Duration) -> Self {
        Self {
            source,
            current: RwLock::new(None),
            refresh_gate: Mutex::new(None),
            min_refresh_interval,
        }
    }

    /// Find the key for `kid`, refreshing the set once on a miss.
    ///
    /// - `Ok(Some(_))`: key found (cached or after refresh)
    /// - `Ok(None)`: key unknown even after refresh
    /// - `Err(_)`: the refresh itself failed (callers fail closed)
    pub async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        if let Some(jwk) = self.lookup(kid).await {
            return Ok(Some(jwk));
        }
        self.refresh_for(kid).await
    }

    async fn lookup(&self, kid: &str) -> Option<Jwk> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|set| set.find(kid).cloned())
    }

    async fn refresh_for(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        let mut last_refresh = self.refresh_gate.lock().await;

        // Someone else may have refreshed while we waited for the gate.
        if let Some(jwk) = self.lookup(kid).await {
            return Ok(Some(jwk));
        }

        if let Some(at) = *last_refresh
            && at.elapsed() < self.min_refresh_interval
        {
            debug!(kid, "key set refreshed recently; not fetching again");
            return Ok(None);
        }

        let set = self.source.fetch().await.map_err(|err| {
            warn!(error = %err, "signing key set refresh failed");
            err
        })?;
        *last_refresh = Some(Instant::now());

        let found = set.find(kid).cloned();
        info!(keys = set.keys.len(), kid, found = found.is_some(), "signing key set refreshed");
        *self.current.write().await = Some(Arc::new(set));

        Ok(found)
    }
}
