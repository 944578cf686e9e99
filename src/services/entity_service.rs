//! # Entity Service
//!
//! Generic cache-aside reads for one entity type. Single lookups go through the
//! key-value cache first and fill it on a miss; filtered listings always go to the
//! search backend.

use crate::cache::KeyValueCache;
use crate::constants::components;
use crate::error::{ServiceError, ServiceResult};
use crate::logging::log_error;
use crate::models::Entity;
use crate::query_builder::{FilterParams, FilterSet};
use crate::search::{ResilientSearchClient, SearchError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read operations the boundary layer depends on
#[async_trait]
pub trait EntityReader<E, P>: Send + Sync
where
    E: Entity,
    P: Send + 'static,
{
    /// The entity with this identifier, or `None` when the backend has no such document
    async fn get_by_id(&self, id: &str) -> ServiceResult<Option<E>>;

    /// Every entity matching `params`, in backend rank order
    async fn get_multi(&self, params: P) -> ServiceResult<Vec<E>>;
}

pub struct EntityService<E, P = FilterParams> {
    cache: KeyValueCache,
    search: Arc<ResilientSearchClient>,
    filter_set: Arc<FilterSet>,
    index: String,
    cache_ttl: Duration,
    _marker: PhantomData<fn() -> (E, P)>,
}

impl<E, P> fmt::Debug for EntityService<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityService")
            .field("index", &self.index)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_prefix", &self.cache.prefix())
            .finish_non_exhaustive()
    }
}

impl<E, P> Clone for EntityService<E, P> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            search: Arc::clone(&self.search),
            filter_set: Arc::clone(&self.filter_set),
            index: self.index.clone(),
            cache_ttl: self.cache_ttl,
            _marker: PhantomData,
        }
    }
}

impl<E, P> EntityService<E, P>
where
    E: Entity,
    P: Into<FilterParams>,
{
    pub fn new(
        cache: KeyValueCache,
        search: Arc<ResilientSearchClient>,
        filter_set: Arc<FilterSet>,
        index: impl Into<String>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            search,
            filter_set,
            index: index.into(),
            cache_ttl,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn filter_set(&self) -> &FilterSet {
        &self.filter_set
    }

    /// Cache key for one entity, before the store prefix is applied
    pub fn cache_key(&self, id: &str) -> String {
        format!("{}:{id}", self.index)
    }

    /// Cache-aside lookup of a single entity.
    ///
    /// A cached entry that fails to decode is reported as
    /// [`ServiceError::CorruptCacheEntry`] rather than silently refetched. When the
    /// entity was fetched but could not be written back, the error is
    /// [`ServiceError::CacheWrite`] and still carries the entity.
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<E>> {
        let key = self.cache_key(id);

        if let Some(raw) = self.cache.get(&key).await? {
            return match E::decode_cached(&raw) {
                Ok(entity) => {
                    debug!(index = %self.index, key = %key, "CACHE HIT");
                    Ok(Some(entity))
                }
                Err(err) => {
                    let full_key = self.cache.build_key(&key);
                    log_error(
                        components::ENTITY_SERVICE,
                        "get_by_id",
                        &format!("Failed to parse cache data for object_id: {id}: {err}"),
                        Some(&full_key),
                    );
                    Err(ServiceError::corrupt_cache_entry(full_key, err.to_string()))
                }
            };
        }
        debug!(index = %self.index, key = %key, "CACHE MISS");

        let document = match self.search.get_document(&self.index, id).await {
            Ok(document) => document,
            Err(SearchError::DocumentNotFound { .. }) => {
                debug!(index = %self.index, id, "Document not found");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let entity = self.decode_document(&document)?;
        let payload = entity
            .encode_cached()
            .map_err(|e| ServiceError::encode(e.to_string()))?;

        if let Err(err) = self.cache.set(&key, payload, Some(self.cache_ttl)).await {
            let full_key = self.cache.build_key(&key);
            log_error(
                components::ENTITY_SERVICE,
                "get_by_id",
                &format!("Failed to write to cache for object_id: {id}: {err}"),
                Some(&full_key),
            );
            return Err(ServiceError::cache_write(
                full_key,
                err.to_string(),
                serde_json::to_value(&entity).ok(),
            ));
        }

        Ok(Some(entity))
    }

    /// Compile `params` through the filter set and run one search. Not cached.
    pub async fn get_multi(&self, params: P) -> ServiceResult<Vec<E>> {
        let params: FilterParams = params.into();
        let query = self.filter_set.filter_query(&params)?;
        let documents = self.search.search(&self.index, &query).await?;

        debug!(index = %self.index, hits = documents.len(), "Search returned documents");

        documents
            .iter()
            .map(|document| self.decode_document(document))
            .collect()
    }

    /// Drop the cached entry for one entity
    pub async fn invalidate(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.cache.delete(&self.cache_key(id)).await? > 0)
    }

    /// Drop every cached entry of this entity type
    pub async fn invalidate_all(&self) -> ServiceResult<u64> {
        Ok(self.cache.clear(&format!("{}:*", self.index)).await?)
    }

    fn decode_document(&self, document: &Value) -> ServiceResult<E> {
        E::deserialize(document).map_err(|err| {
            let id = document
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            log_error(
                components::ENTITY_SERVICE,
                "decode_document",
                &err.to_string(),
                Some(&format!("{}/{id}", self.index)),
            );
            ServiceError::decode(&self.index, id, err.to_string())
        })
    }
}

#[async_trait]
impl<E, P> EntityReader<E, P> for EntityService<E, P>
where
    E: Entity,
    P: Into<FilterParams> + Send + 'static,
{
    async fn get_by_id(&self, id: &str) -> ServiceResult<Option<E>> {
        EntityService::get_by_id(self, id).await
    }

    async fn get_multi(&self, params: P) -> ServiceResult<Vec<E>> {
        EntityService::get_multi(self, params).await
    }
}
