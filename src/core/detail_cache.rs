use crate::domain::model::{MovieId, RawDocument};
use crate::domain::ports::{CacheStore, CatalogSource};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::Mutex;

type GateMap = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

/// Cache-aside lookup of detail documents.
///
/// A cached value is returned as-is. On a miss the document is fetched from
/// the source, written to the cache under the identifier, then returned. A
/// failed fetch writes nothing.
///
/// By default concurrent misses for the same identifier each fetch and the
/// last write wins. [`DetailCache::with_single_flight`] coalesces them.
pub struct DetailCache<S: CacheStore, F: CatalogSource> {
    cache: S,
    source: F,
    detail_prefix: String,
    single_flight: bool,
    inflight: GateMap,
}

impl<S: CacheStore, F: CatalogSource> DetailCache<S, F> {
    pub fn new(cache: S, source: F, detail_prefix: impl Into<String>) -> Self {
        Self {
            cache,
            source,
            detail_prefix: detail_prefix.into(),
            single_flight: false,
            inflight: StdMutex::new(HashMap::new()),
        }
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    pub fn cache(&self) -> &S {
        &self.cache
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub async fn get_details(&self, id: &MovieId) -> Result<RawDocument> {
        if let Some(cached) = self.cache.get(id.as_str()).await? {
            tracing::debug!("Cache hit for {}", id);
            return Ok(cached);
        }

        tracing::debug!("Cache miss for {}", id);
        if self.single_flight {
            self.fetch_coalesced(id).await
        } else {
            self.fetch_and_store(id).await
        }
    }

    async fn fetch_and_store(&self, id: &MovieId) -> Result<RawDocument> {
        let resource = format!("{}{}", self.detail_prefix, id);
        let document = self.source.fetch(&resource).await?;

        self.cache.set(id.as_str(), &document).await?;
        tracing::debug!("Stored {} ({} bytes) in cache", id, document.len());

        Ok(document)
    }

    async fn fetch_coalesced(&self, id: &MovieId) -> Result<RawDocument> {
        let ticket = GateTicket::join(&self.inflight, id.as_str());
        let _turn = ticket.gate().lock().await;
        self.recheck_then_fetch(id).await
    }

    async fn recheck_then_fetch(&self, id: &MovieId) -> Result<RawDocument> {
        if let Some(cached) = self.cache.get(id.as_str()).await? {
            tracing::debug!("Reusing document for {} stored by a concurrent fetch", id);
            return Ok(cached);
        }
        self.fetch_and_store(id).await
    }
}

/// Holds one reference to a per-key gate; the last holder removes the map entry.
///
/// Cleanup runs in `Drop` so a caller that abandons the future (for example on
/// a deadline) still releases its slot.
struct GateTicket<'a> {
    inflight: &'a GateMap,
    key: &'a str,
    gate: Option<Arc<Mutex<()>>>,
}

impl<'a> GateTicket<'a> {
    fn join(inflight: &'a GateMap, key: &'a str) -> Self {
        let mut map = inflight.lock().unwrap_or_else(PoisonError::into_inner);
        let gate = map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Self {
            inflight,
            key,
            gate: Some(gate),
        }
    }

    fn gate(&self) -> &Mutex<()> {
        self.gate.as_deref().expect("gate is held until drop")
    }
}

impl Drop for GateTicket<'_> {
    fn drop(&mut self) {
        let mut map = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        // 在鎖內釋放引用，計數才不會與其他 ticket 競爭
        drop(self.gate.take());
        if map
            .get(self.key)
            .is_some_and(|gate| Arc::strong_count(gate) == 1)
        {
            map.remove(self.key);
        }
    }
}
