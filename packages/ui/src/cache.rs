//! Query cache context and the `use_query` hook.
//!
//! [`SharedCache`] wraps the store's [`QueryCache`] in a signal. Components
//! that read data subscribe to the cache signal, so optimistic patches and
//! fresh responses re-render them. Refetching is driven by a separate
//! `revision` signal that only moves when something is invalidated. A failed
//! fetch therefore does not loop.

use std::future::Future;

use api::{ApiClient, ApiError};
use chrono::Utc;
use dioxus::prelude::*;
use store::browse::ListState;
use store::cache::{fetch_into, run_optimistic};
use store::{CacheHandle, CachePolicy, QueryCache, QueryKey, Snapshot};

use crate::auth::use_auth;

#[derive(Clone, Copy, PartialEq)]
pub struct SharedCache {
    cache: Signal<QueryCache>,
    revision: Signal<u64>,
}

impl CacheHandle for SharedCache {
    fn with_cache<R>(&self, f: impl FnOnce(&mut QueryCache) -> R) -> R {
        let mut cache = self.cache;
        let mut guard = cache.write();
        f(&mut *guard)
    }
}

impl SharedCache {
    /// Subscribing read of cached data.
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.cache.read().get_cloned::<T>(key)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.cache.peek().is_stale(key, Utc::now())
    }

    pub fn set<T: 'static>(&self, key: QueryKey, data: T) {
        self.with_cache(|cache| cache.set(key, data, Utc::now()));
    }

    pub fn invalidate(&self, keys: &[QueryKey]) {
        self.with_cache(|cache| {
            for key in keys {
                cache.invalidate(key);
            }
        });
        self.bump();
    }

    /// Drop every entry, e.g. on logout.
    pub fn clear(&self) {
        self.with_cache(QueryCache::clear);
        self.bump();
    }

    /// Ask active queries to re-check freshness.
    pub fn bump(&self) {
        let mut revision = self.revision;
        let next = *revision.peek() + 1;
        revision.set(next);
    }

    /// Apply `patch`, await `request`, then keep or roll back the patch.
    /// Either way the `settle` keys are invalidated and refetched.
    pub async fn mutate<T, Fut>(
        &self,
        patch: impl FnOnce(&mut QueryCache) -> Vec<Snapshot>,
        request: Fut,
        settle: &[QueryKey],
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let result = run_optimistic(self, patch, request, settle).await;
        self.bump();
        result
    }
}

pub fn use_cache() -> SharedCache {
    use_context::<SharedCache>()
}

#[component]
pub fn CacheProvider(policy: CachePolicy, children: Element) -> Element {
    let cache = use_signal(|| QueryCache::new(policy.clone()));
    let revision = use_signal(|| 0u64);
    use_context_provider(|| SharedCache { cache, revision });

    rsx! {
        {children}
    }
}

/// What a component sees of one cached resource.
#[derive(Clone, Debug, PartialEq)]
pub struct Query<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Query<T> {
    /// Cached data is on screen while a newer copy is being fetched.
    pub fn is_refreshing(&self) -> bool {
        self.loading && self.data.is_some()
    }
}

impl<T: Clone> Query<Vec<T>> {
    /// Data wins over an error from a background refetch.
    pub fn list_state(&self) -> ListState<T> {
        match (&self.data, &self.error) {
            (Some(items), _) => ListState::from_result(Ok(items.clone())),
            (None, Some(error)) => ListState::Error(error.clone()),
            (None, None) => ListState::Loading,
        }
    }
}

/// Serve `key` from the cache, fetching it when missing, invalidated or old.
///
/// Refetches when the signed-in client changes, the key changes, or the
/// cache revision moves.
pub fn use_query<T, F, Fut>(key: QueryKey, fetch: F) -> Query<T>
where
    T: Clone + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let cache = use_cache();
    let auth = use_auth();
    let mut key_signal = use_signal(|| key.clone());
    if *key_signal.peek() != key {
        key_signal.set(key.clone());
    }
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let _loader = use_resource(move || {
        let key = key_signal();
        let client = auth.read().client.clone();
        let _revision = *cache.revision.read();
        let request = cache.is_stale(&key).then(|| fetch(client));
        async move {
            let Some(request) = request else {
                return;
            };
            loading.set(true);
            match fetch_into(&cache, key.clone(), request).await {
                Ok(()) => error.set(None),
                Err(e) => {
                    tracing::warn!(?key, "query failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        }
    });

    Query {
        data: cache.get::<T>(&key),
        loading: loading(),
        error: error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(data: Option<Vec<u32>>, error: Option<&str>) -> Query<Vec<u32>> {
        Query {
            data,
            loading: false,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn list_state_separates_empty_from_error() {
        assert_eq!(query(None, None).list_state(), ListState::Loading);
        assert_eq!(query(Some(vec![]), None).list_state(), ListState::Empty);
        assert_eq!(
            query(None, Some("Server error")).list_state(),
            ListState::Error("Server error".to_string())
        );
    }

    #[test]
    fn cached_data_wins_over_refetch_error() {
        let state = query(Some(vec![1, 2]), Some("offline")).list_state();
        assert_eq!(state, ListState::Ready(vec![1, 2]));
    }

    #[test]
    fn refreshing_only_with_data_on_screen() {
        let mut first_load = query(None, None);
        first_load.loading = true;
        assert!(!first_load.is_refreshing());

        let mut background = query(Some(vec![1]), None);
        assert!(!background.is_refreshing());
        background.loading = true;
        assert!(background.is_refreshing());
    }
}
