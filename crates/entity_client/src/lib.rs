//! Fetch Service: random remote lookups, normalized and fanned in by position.

use async_trait::async_trait;
use futures::future::join_all;
use rand::Rng;
use reqwest::Client;
use shared::{
    domain::{EntityId, NormalizedEntity},
    error::FetchError,
    protocol::RawEntity,
};
use tracing::{debug, warn};
use url::Url;

pub mod normalize;

pub use normalize::normalize;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TOTAL_ENTITY_COUNT: u32 = 1008;

#[async_trait]
pub trait EntityApi: Send + Sync {
    async fn lookup(&self, id: EntityId) -> Result<RawEntity, FetchError>;
}

/// Produces one slot result per requested position; never fails as a whole.
#[async_trait]
pub trait BatchSource: Send + Sync {
    async fn load_batch(&self, count: usize) -> Vec<Option<NormalizedEntity>>;
}

pub struct HttpEntityApi {
    http: Client,
    base_url: Url,
}

impl HttpEntityApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn entity_url(&self, id: EntityId) -> String {
        format!(
            "{}/pokemon/{}",
            self.base_url.as_str().trim_end_matches('/'),
            id.0
        )
    }
}

#[async_trait]
impl EntityApi for HttpEntityApi {
    async fn lookup(&self, id: EntityId) -> Result<RawEntity, FetchError> {
        let response = self
            .http
            .get(self.entity_url(id))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Remote {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::MalformedResponse(e.to_string()))
    }
}

pub struct EntityFetcher<A> {
    api: A,
    total_entity_count: u32,
}

impl<A: EntityApi> EntityFetcher<A> {
    pub fn new(api: A, total_entity_count: u32) -> Self {
        Self {
            api,
            total_entity_count: total_entity_count.max(1),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn total_entity_count(&self) -> u32 {
        self.total_entity_count
    }

    /// Uniform over `1..=total_entity_count`.
    pub fn pick_id(&self) -> EntityId {
        EntityId(rand::rng().random_range(1..=self.total_entity_count))
    }

    pub async fn fetch_one(&self) -> Result<NormalizedEntity, FetchError> {
        let id = self.pick_id();
        let raw = self.api.lookup(id).await?;
        debug!(entity_id = id.0, name = %raw.name, "entity: lookup succeeded");
        Ok(normalize(raw))
    }

    /// Runs `count` lookups concurrently on the calling task and waits for all
    /// of them; position `i` of the result always belongs to request `i`.
    pub async fn fetch_batch(&self, count: usize) -> Vec<Option<NormalizedEntity>> {
        let lookups = (0..count).map(|index| async move {
            match self.fetch_one().await {
                Ok(entity) => Some(entity),
                Err(error) => {
                    warn!(
                        index,
                        kind = error.kind(),
                        %error,
                        "entity: lookup failed, slot left empty"
                    );
                    None
                }
            }
        });

        let results = join_all(lookups).await;
        debug!(
            requested = count,
            resolved = results.iter().filter(|entity| entity.is_some()).count(),
            "entity: batch settled"
        );
        results
    }
}

#[async_trait]
impl<A: EntityApi> BatchSource for EntityFetcher<A> {
    async fn load_batch(&self, count: usize) -> Vec<Option<NormalizedEntity>> {
        self.fetch_batch(count).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
