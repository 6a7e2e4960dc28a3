//! # Query cache: client-side copies of backend resources
//!
//! [`QueryCache`] holds the last response for each [`QueryKey`], decides when
//! that response is stale, and supports optimistic updates with rollback.
//!
//! ## Freshness
//!
//! An entry is stale when it has never been fetched, when it was explicitly
//! invalidated (after a successful write), or when it is older than the
//! key's stale time from [`CachePolicy`]. Option lists use the longer
//! reference window.
//!
//! ## Reads racing writes
//!
//! Every read takes a [`FetchTicket`] carrying the entry's generation. An
//! optimistic update bumps the generation, so a read that was already in
//! flight cannot land on top of the optimistic value:
//! [`finish_fetch`](QueryCache::finish_fetch) drops it and returns `false`.
//!
//! ## Optimistic writes
//!
//! [`run_optimistic`] applies a patch synchronously, awaits the request, then
//! either invalidates the related keys (success) or restores the
//! [`Snapshot`]s taken by the patch (failure). It works through the
//! [`CacheHandle`] trait so the UI can drive it from a signal and tests from a
//! `Rc<RefCell<QueryCache>>`.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::CacheConfig;
use crate::models::Variety;

/// Identifies one cached backend resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Varieties,
    PublicVarieties,
    Variety(String),
    VarietyOptions,
    Allotment,
    Profile,
    Preferences,
    VerificationStatus,
}

impl QueryKey {
    /// Read-only option lists that change rarely.
    pub fn is_reference(&self) -> bool {
        matches!(self, QueryKey::VarietyOptions)
    }

    /// Keys holding grow guide data.
    pub fn is_variety(&self) -> bool {
        matches!(
            self,
            QueryKey::Varieties | QueryKey::PublicVarieties | QueryKey::Variety(_)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CachePolicy {
    pub stale_time: TimeDelta,
    pub reference_stale_time: TimeDelta,
}

impl CachePolicy {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            stale_time: TimeDelta::seconds(config.stale_time_secs as i64),
            reference_stale_time: TimeDelta::seconds(config.reference_stale_time_secs as i64),
        }
    }

    fn stale_time_for(&self, key: &QueryKey) -> TimeDelta {
        if key.is_reference() {
            self.reference_stale_time
        } else {
            self.stale_time
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[derive(Default)]
struct Entry {
    data: Option<Rc<dyn Any>>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    generation: u64,
}

/// Proof that a read started at a given entry generation.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

/// Previous state of one entry, taken before an optimistic patch.
pub struct Snapshot {
    key: QueryKey,
    data: Option<Rc<dyn Any>>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
}

impl Snapshot {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("key", &self.key)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
    policy: CachePolicy,
}

impl QueryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    pub fn get<T: 'static>(&self, key: &QueryKey) -> Option<&T> {
        self.entries.get(key)?.data.as_ref()?.downcast_ref::<T>()
    }

    pub fn get_cloned<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.get::<T>(key).cloned()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.data.is_some())
    }

    pub fn is_stale(&self, key: &QueryKey, now: DateTime<Utc>) -> bool {
        let Some(entry) = self.entries.get(key) else {
            return true;
        };
        match (&entry.data, entry.updated_at) {
            (Some(_), Some(at)) if !entry.invalidated => {
                now - at >= self.policy.stale_time_for(key)
            }
            _ => true,
        }
    }

    pub fn set<T: 'static>(&mut self, key: QueryKey, data: T, now: DateTime<Utc>) {
        let entry = self.entries.entry(key).or_default();
        entry.data = Some(Rc::new(data));
        entry.updated_at = Some(now);
        entry.invalidated = false;
    }

    pub fn begin_fetch(&mut self, key: &QueryKey) -> FetchTicket {
        let entry = self.entries.entry(key.clone()).or_default();
        FetchTicket {
            key: key.clone(),
            generation: entry.generation,
        }
    }

    /// Store a read result unless the entry changed since the read started.
    pub fn finish_fetch<T: 'static>(
        &mut self,
        ticket: FetchTicket,
        data: T,
        now: DateTime<Utc>,
    ) -> bool {
        let current = self
            .entries
            .get(&ticket.key)
            .map(|e| e.generation)
            .unwrap_or_default();
        if current != ticket.generation {
            tracing::debug!(key = ?ticket.key, "dropping superseded fetch result");
            return false;
        }
        self.set(ticket.key, data, now);
        true
    }

    /// Make any in-flight read for `key` land nowhere.
    pub fn cancel_fetches(&mut self, key: &QueryKey) {
        self.entries.entry(key.clone()).or_default().generation += 1;
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    /// Invalidate every entry matching `predicate`.
    pub fn invalidate_where(&mut self, predicate: impl Fn(&QueryKey) -> bool) {
        for (key, entry) in self.entries.iter_mut() {
            if predicate(key) {
                entry.invalidated = true;
            }
        }
    }

    pub fn remove(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// Drop every cached response, e.g. on logout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Patch a cached value in place, returning the state to roll back to.
    ///
    /// In-flight reads for the key are cancelled first. Returns `None` when
    /// nothing of type `T` is cached under `key`.
    #[must_use]
    pub fn update<T: Clone + 'static>(
        &mut self,
        key: &QueryKey,
        f: impl FnOnce(&mut T),
    ) -> Option<Snapshot> {
        self.cancel_fetches(key);
        let entry = self.entries.get_mut(key)?;
        let mut value = entry.data.as_ref()?.downcast_ref::<T>()?.clone();
        let snapshot = Snapshot {
            key: key.clone(),
            data: entry.data.clone(),
            updated_at: entry.updated_at,
            invalidated: entry.invalidated,
        };
        f(&mut value);
        entry.data = Some(Rc::new(value));
        Some(snapshot)
    }

    /// Remove a cached value, returning the state to roll back to.
    #[must_use]
    pub fn take(&mut self, key: &QueryKey) -> Option<Snapshot> {
        self.cancel_fetches(key);
        let entry = self.entries.get_mut(key)?;
        let data = entry.data.take()?;
        Some(Snapshot {
            key: key.clone(),
            data: Some(data),
            updated_at: entry.updated_at.take(),
            invalidated: entry.invalidated,
        })
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        let entry = self.entries.entry(snapshot.key).or_default();
        entry.data = snapshot.data;
        entry.updated_at = snapshot.updated_at;
        // An invalidation recorded after the snapshot still needs its refetch.
        entry.invalidated |= snapshot.invalidated;
        entry.generation += 1;
    }

    /// Optimistically drop a guide from the owner's list and its detail entry.
    pub fn remove_variety(&mut self, variety_id: &str) -> Vec<Snapshot> {
        let mut snapshots = Vec::new();
        snapshots.extend(self.update::<Vec<Variety>>(&QueryKey::Varieties, |list| {
            list.retain(|v| v.variety_id != variety_id)
        }));
        snapshots.extend(self.take(&QueryKey::Variety(variety_id.to_string())));
        snapshots
    }

    /// Optimistically flip a guide's public flag.
    pub fn set_variety_public(&mut self, variety_id: &str, is_public: bool) -> Vec<Snapshot> {
        self.patch_variety(variety_id, |v| v.is_public = is_public)
    }

    /// Optimistically flip a guide's active flag. Other guides are untouched.
    pub fn set_variety_active(&mut self, variety_id: &str, is_active: bool) -> Vec<Snapshot> {
        self.patch_variety(variety_id, |v| v.is_active = is_active)
    }

    fn patch_variety(&mut self, variety_id: &str, patch: impl Fn(&mut Variety)) -> Vec<Snapshot> {
        let mut snapshots = Vec::new();
        snapshots.extend(self.update::<Vec<Variety>>(&QueryKey::Varieties, |list| {
            if let Some(v) = list.iter_mut().find(|v| v.variety_id == variety_id) {
                patch(v);
            }
        }));
        snapshots.extend(
            self.update::<Variety>(&QueryKey::Variety(variety_id.to_string()), |v| patch(v)),
        );
        snapshots
    }
}

/// Access to a shared [`QueryCache`].
pub trait CacheHandle {
    fn with_cache<R>(&self, f: impl FnOnce(&mut QueryCache) -> R) -> R;
}

impl CacheHandle for Rc<RefCell<QueryCache>> {
    fn with_cache<R>(&self, f: impl FnOnce(&mut QueryCache) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Fetch `key` and store the result unless an optimistic write superseded it.
pub async fn fetch_into<H, T, E, Fut>(handle: &H, key: QueryKey, fetch: Fut) -> Result<(), E>
where
    H: CacheHandle,
    T: 'static,
    Fut: Future<Output = Result<T, E>>,
{
    let ticket = handle.with_cache(|cache| cache.begin_fetch(&key));
    let data = fetch.await?;
    handle.with_cache(|cache| cache.finish_fetch(ticket, data, Utc::now()));
    Ok(())
}

/// Apply `patch`, await `request`, then settle or roll back.
///
/// `request` is not polled until the patch has been applied. The `settle`
/// keys are invalidated either way: a rollback restores whole entries, which
/// can undo an overlapping write the backend already accepted.
pub async fn run_optimistic<H, T, E, Fut>(
    handle: &H,
    patch: impl FnOnce(&mut QueryCache) -> Vec<Snapshot>,
    request: Fut,
    settle: &[QueryKey],
) -> Result<T, E>
where
    H: CacheHandle,
    Fut: Future<Output = Result<T, E>>,
{
    let snapshots = handle.with_cache(patch);
    let result = request.await;
    handle.with_cache(|cache| match &result {
        Ok(_) => {
            for key in settle {
                cache.invalidate(key);
            }
        }
        Err(_) => {
            tracing::debug!(count = snapshots.len(), "rolling back optimistic update");
            for snapshot in snapshots.into_iter().rev() {
                cache.restore(snapshot);
            }
            for key in settle {
                cache.invalidate(key);
            }
        }
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::guide;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn seeded() -> Rc<RefCell<QueryCache>> {
        let mut cache = QueryCache::default();
        cache.set(
            QueryKey::Varieties,
            vec![
                guide("a", "Spring Onions", Some("Allium")),
                guide("b", "Courgette", Some("Cucurbitaceae")),
                guide("c", "Heirloom Carrots", Some("Apiaceae")),
            ],
            now(),
        );
        Rc::new(RefCell::new(cache))
    }

    fn names(cache: &Rc<RefCell<QueryCache>>) -> Vec<String> {
        cache
            .borrow()
            .get::<Vec<Variety>>(&QueryKey::Varieties)
            .unwrap()
            .iter()
            .map(|v| v.variety_name.clone())
            .collect()
    }

    #[test]
    fn staleness_follows_policy_windows() {
        let mut cache = QueryCache::default();
        assert!(cache.is_stale(&QueryKey::Varieties, now()));

        cache.set(QueryKey::Varieties, Vec::<Variety>::new(), now());
        cache.set(QueryKey::VarietyOptions, 1u8, now());
        let later = now() + TimeDelta::minutes(10);
        assert!(!cache.is_stale(&QueryKey::Varieties, now() + TimeDelta::minutes(4)));
        assert!(cache.is_stale(&QueryKey::Varieties, later));
        assert!(!cache.is_stale(&QueryKey::VarietyOptions, later));
    }

    #[test]
    fn invalidate_marks_entry_stale_but_keeps_data() {
        let cache = seeded();
        cache.borrow_mut().invalidate(&QueryKey::Varieties);
        assert!(cache.borrow().is_stale(&QueryKey::Varieties, now()));
        assert_eq!(names(&cache).len(), 3);
    }

    #[test]
    fn get_with_wrong_type_is_none() {
        let cache = seeded();
        assert!(cache.borrow().get::<String>(&QueryKey::Varieties).is_none());
    }

    #[tokio::test]
    async fn delete_success_keeps_guide_removed_and_invalidates() {
        let cache = seeded();
        let result: Result<(), String> = run_optimistic(
            &cache,
            |c| c.remove_variety("a"),
            async { Ok(()) },
            &[QueryKey::Varieties],
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(names(&cache), vec!["Courgette", "Heirloom Carrots"]);
        assert!(cache.borrow().is_stale(&QueryKey::Varieties, now()));
    }

    #[tokio::test]
    async fn delete_failure_restores_guide() {
        let cache = seeded();
        let observed = Rc::new(RefCell::new(Vec::new()));

        let during = {
            let cache = cache.clone();
            let observed = observed.clone();
            async move {
                observed.replace(names(&cache));
                Err::<(), _>("Failed to delete grow guide".to_string())
            }
        };
        let result = run_optimistic(&cache, |c| c.remove_variety("a"), during, &[]).await;

        assert_eq!(result.unwrap_err(), "Failed to delete grow guide");
        // Removed while the request was pending, back afterwards in place.
        assert_eq!(*observed.borrow(), vec!["Courgette", "Heirloom Carrots"]);
        assert_eq!(names(&cache), vec!["Spring Onions", "Courgette", "Heirloom Carrots"]);
        assert!(!cache.borrow().is_stale(&QueryKey::Varieties, now()));
    }

    #[tokio::test]
    async fn visibility_toggle_reverts_on_failure() {
        let cache = seeded();
        let detail = guide("b", "Courgette", Some("Cucurbitaceae"));
        cache
            .borrow_mut()
            .set(QueryKey::Variety("b".into()), detail, now());

        let result: Result<(), String> = run_optimistic(
            &cache,
            |c| {
                let snaps = c.set_variety_public("b", true);
                assert_eq!(snaps.len(), 2);
                snaps
            },
            async { Err("Server error".to_string()) },
            &[],
        )
        .await;

        assert!(result.is_err());
        let cache = cache.borrow();
        let list = cache.get::<Vec<Variety>>(&QueryKey::Varieties).unwrap();
        assert!(!list[1].is_public);
        assert!(!cache.get::<Variety>(&QueryKey::Variety("b".into())).unwrap().is_public);
    }

    #[tokio::test]
    async fn visibility_toggle_sticks_on_success() {
        let cache = seeded();
        let result: Result<(), String> = run_optimistic(
            &cache,
            |c| c.set_variety_public("c", true),
            async { Ok(()) },
            &[QueryKey::Varieties, QueryKey::PublicVarieties],
        )
        .await;

        assert!(result.is_ok());
        let cache = cache.borrow();
        let list = cache.get::<Vec<Variety>>(&QueryKey::Varieties).unwrap();
        assert!(list[2].is_public);
    }

    #[tokio::test]
    async fn failed_toggle_does_not_hide_overlapping_success() {
        let cache = seeded();
        let settle = [QueryKey::Varieties, QueryKey::PublicVarieties];
        let slow_failure = async {
            tokio::task::yield_now().await;
            Err::<(), _>("Server error".to_string())
        };

        // "a" is patched first and fails after "b" has been accepted.
        let (a, b) = tokio::join!(
            run_optimistic(&cache, |c| c.set_variety_public("a", true), slow_failure, &settle),
            run_optimistic(
                &cache,
                |c| c.set_variety_public("b", true),
                async { Ok::<(), String>(()) },
                &settle,
            ),
        );
        assert!(a.is_err());
        assert!(b.is_ok());
        assert!(cache.borrow().is_stale(&QueryKey::Varieties, now()));

        let mut from_server = vec![
            guide("a", "Spring Onions", Some("Allium")),
            guide("b", "Courgette", Some("Cucurbitaceae")),
            guide("c", "Heirloom Carrots", Some("Apiaceae")),
        ];
        from_server[1].is_public = true;
        let refetched: Result<(), String> =
            fetch_into(&cache, QueryKey::Varieties, async { Ok(from_server) }).await;
        assert!(refetched.is_ok());

        let cache = cache.borrow();
        let list = cache.get::<Vec<Variety>>(&QueryKey::Varieties).unwrap();
        assert!(!list[0].is_public);
        assert!(list[1].is_public);
        assert!(!cache.is_stale(&QueryKey::Varieties, now()));
    }

    #[test]
    fn restore_keeps_later_invalidation() {
        let cache = seeded();
        let first = cache.borrow_mut().set_variety_public("a", true);
        let _ = cache.borrow_mut().set_variety_public("b", true);
        cache.borrow_mut().invalidate(&QueryKey::Varieties);
        let ticket = cache.borrow_mut().begin_fetch(&QueryKey::Varieties);

        for snapshot in first.into_iter().rev() {
            cache.borrow_mut().restore(snapshot);
        }

        // The in-flight read is dropped, but the entry still asks for a new one.
        let stored = cache.borrow_mut().finish_fetch(ticket, Vec::<Variety>::new(), now());
        assert!(!stored);
        assert!(cache.borrow().is_stale(&QueryKey::Varieties, now()));
    }

    #[test]
    fn activating_one_guide_leaves_others_alone() {
        let cache = seeded();
        let _ = cache.borrow_mut().set_variety_active("a", true);
        let _ = cache.borrow_mut().set_variety_active("b", true);

        let cache = cache.borrow();
        let list = cache.get::<Vec<Variety>>(&QueryKey::Varieties).unwrap();
        assert!(list[0].is_active);
        assert!(list[1].is_active);
        assert!(!list[2].is_active);
    }

    #[test]
    fn optimistic_update_supersedes_in_flight_read() {
        let cache = seeded();
        let ticket = cache.borrow_mut().begin_fetch(&QueryKey::Varieties);

        let _ = cache.borrow_mut().remove_variety("a");

        let stale_read = vec![guide("a", "Spring Onions", Some("Allium"))];
        let stored = cache.borrow_mut().finish_fetch(ticket, stale_read, now());
        assert!(!stored);
        assert_eq!(names(&cache), vec!["Courgette", "Heirloom Carrots"]);
    }

    #[tokio::test]
    async fn fetch_into_stores_result() {
        let cache = Rc::new(RefCell::new(QueryCache::default()));
        let result: Result<(), String> =
            fetch_into(&cache, QueryKey::Varieties, async { Ok(Vec::<Variety>::new()) }).await;
        assert!(result.is_ok());
        assert!(cache.borrow().contains(&QueryKey::Varieties));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_untouched() {
        let cache = seeded();
        let result: Result<(), String> = fetch_into(&cache, QueryKey::Varieties, async {
            Err::<Vec<Variety>, _>("Network error".to_string())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(names(&cache).len(), 3);
    }
}
