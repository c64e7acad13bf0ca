use std::{
    collections::HashMap,
    sync::{
        Arc, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use bcsync_model::BuildConfig;
use tracing::trace;
use uuid::Uuid;

use super::{BuildConfigStore, StoreError};

type Key = (String, String);

#[derive(Default)]
struct Inner {
    objects: RwLock<HashMap<Key, BuildConfig>>,
    offline: RwLock<Option<String>>,
    /// Monotonic resource version source shared by all objects of this store.
    version_seq: AtomicU64,
    reads: AtomicU64,
}

/// In-memory [`BuildConfigStore`] with server-like identity semantics.
///
/// - [`MemoryStore::create`] assigns a fresh uid and resource version.
/// - [`MemoryStore::update`] keeps the uid and advances the resource version.
/// - [`MemoryStore::delete`] drops the object; recreating it yields a new uid.
///
/// Clones share the same underlying state. Useful as a fake in tests and for
/// engines that mirror cluster state locally.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new object, assigning a fresh uid and resource version.
    ///
    /// Any object already stored at the same coordinate is replaced, which is
    /// equivalent to a delete followed by a create on a real server.
    /// Returns `None` (and stores nothing) if `bc` has no namespace or name.
    pub fn create(&self, mut bc: BuildConfig) -> Option<BuildConfig> {
        let key = key_of(&bc)?;
        bc.metadata.uid = Some(Uuid::new_v4().to_string());
        bc.metadata.resource_version = Some(self.next_version());
        self.put(key, bc.clone())?;
        Some(bc)
    }

    /// Replace the spec of an existing object, keeping its uid.
    ///
    /// Returns `None` if nothing is stored at the coordinate of `bc`.
    pub fn update(&self, mut bc: BuildConfig) -> Option<BuildConfig> {
        let key = key_of(&bc)?;
        let mut objects = self.inner.objects.write().ok()?;
        let current = objects.get(&key)?;

        bc.metadata.uid = current.metadata.uid.clone();
        bc.metadata.resource_version = Some(self.next_version());
        objects.insert(key, bc.clone());
        Some(bc)
    }

    /// Store an object exactly as given, without touching uid or resource version.
    ///
    /// Returns `None` (and stores nothing) if `bc` has no namespace or name.
    pub fn insert(&self, bc: BuildConfig) -> Option<BuildConfig> {
        let key = key_of(&bc)?;
        self.put(key, bc.clone())?;
        Some(bc)
    }

    /// Remove the object at `namespace/name`, returning it if present.
    pub fn delete(&self, namespace: &str, name: &str) -> Option<BuildConfig> {
        self.inner
            .objects
            .write()
            .ok()?
            .remove(&(namespace.to_string(), name.to_string()))
    }

    /// Make every subsequent read fail with [`StoreError::Unavailable`].
    ///
    /// Pass `None` to bring the store back.
    pub fn set_offline(&self, reason: Option<String>) -> Result<(), StoreError> {
        *self.inner.offline.write().map_err(|_| poisoned())? = reason;
        Ok(())
    }

    /// Number of reads served (or refused) so far.
    pub fn reads(&self) -> u64 {
        self.inner.reads.load(Ordering::Relaxed)
    }

    /// Number of stored objects.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.objects.read().map_err(|_| poisoned())?.len())
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn put(&self, key: Key, bc: BuildConfig) -> Option<()> {
        let mut objects = self.inner.objects.write().ok()?;
        trace!(namespace = %key.0, name = %key.1, "memory store write");
        objects.insert(key, bc);
        Some(())
    }

    fn next_version(&self) -> String {
        (self.inner.version_seq.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}

#[async_trait]
impl BuildConfigStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Option<BuildConfig>, StoreError> {
        self.inner.reads.fetch_add(1, Ordering::Relaxed);

        if let Some(reason) = self.inner.offline.read().map_err(|_| poisoned())?.clone() {
            return Err(StoreError::Unavailable(reason));
        }

        let objects = self.inner.objects.read().map_err(|_| poisoned())?;
        Ok(objects
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }
}

fn key_of(bc: &BuildConfig) -> Option<Key> {
    let namespace = bc.metadata.namespace.clone().filter(|s| !s.is_empty())?;
    let name = bc.metadata.name.clone().filter(|s| !s.is_empty())?;
    Some((namespace, name))
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_unknown_coordinate() {
        let store = MemoryStore::new();
        assert!(store.get("ci", "missing").await.unwrap().is_none());
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn create_assigns_identity_and_version() {
        let store = MemoryStore::new();
        let created = store.create(BuildConfig::new("ci", "app")).unwrap();

        assert!(created.uid().is_some());
        assert!(created.resource_version().is_some());

        let fetched = store.get("ci", "app").await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_keeps_uid_and_advances_version() {
        let store = MemoryStore::new();
        let created = store
            .create(BuildConfig::new("ci", "app").with_context_dir("a"))
            .unwrap();

        let updated = store
            .update(BuildConfig::new("ci", "app").with_context_dir("b"))
            .expect("object exists");

        assert_eq!(updated.uid(), created.uid());
        assert_ne!(updated.resource_version(), created.resource_version());
        assert_eq!(updated.context_dir(), Some("b"));
    }

    #[test]
    fn update_of_missing_object_is_none() {
        let store = MemoryStore::new();
        assert!(store.update(BuildConfig::new("ci", "ghost")).is_none());
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn recreate_after_delete_changes_uid() {
        let store = MemoryStore::new();
        let first = store.create(BuildConfig::new("ci", "app")).unwrap();
        assert!(store.delete("ci", "app").is_some());
        let second = store.create(BuildConfig::new("ci", "app")).unwrap();

        assert_ne!(first.uid(), second.uid());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn offline_store_refuses_reads() {
        let store = MemoryStore::new();
        store.create(BuildConfig::new("ci", "app")).unwrap();
        store.set_offline(Some("network partition".into())).unwrap();

        let err = store.get("ci", "app").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(ref r) if r == "network partition"));

        store.set_offline(None).unwrap();
        assert!(store.get("ci", "app").await.unwrap().is_some());
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.create(BuildConfig::new("ci", "app")).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn create_without_coordinate_stores_nothing() {
        let store = MemoryStore::new();
        let mut bc = BuildConfig::new("ci", "app");
        bc.metadata.namespace = None;

        assert!(store.create(bc).is_none());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn insert_with_empty_name_stores_nothing() {
        let store = MemoryStore::new();
        assert!(store.insert(BuildConfig::new("ci", "")).is_none());
        assert!(store.is_empty().unwrap());

        let stored = store.insert(BuildConfig::new("ci", "app")).unwrap();
        assert_eq!(stored.metadata.name.as_deref(), Some("app"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn poisoned_locks_report_unavailable() {
        let store = MemoryStore::new();
        store.create(BuildConfig::new("ci", "app")).unwrap();

        let writer = store.clone();
        let _ = std::thread::spawn(move || {
            let _objects = writer.inner.objects.write().unwrap();
            let _offline = writer.inner.offline.write().unwrap();
            panic!("writer died holding the locks");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.set_offline(None),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.get("ci", "app").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.create(BuildConfig::new("ci", "other")).is_none());
    }
}
