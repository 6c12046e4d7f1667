//! An explicit, injectable holder for the loaded documentation snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use crate::model::DocsData;

/// Lazily initialised, shareable [`DocsData`].
///
/// Readers get an `Arc` to the snapshot, so invalidating the cache never
/// disturbs a snapshot somebody is still using.
#[derive(Debug, Default)]
pub struct DocsCache {
    slot: RwLock<Option<Arc<DocsData>>>,
}

impl DocsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<DocsData>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return the cached snapshot, running `loader` if there is none yet.
    ///
    /// The write lock is held while `loader` runs, so concurrent callers load
    /// at most once. A failed load leaves the cache empty.
    pub fn get_or_try_init<E>(
        &self,
        loader: impl FnOnce() -> Result<DocsData, E>,
    ) -> Result<Arc<DocsData>, E> {
        if let Some(data) = self.get() {
            return Ok(data);
        }
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(data) = slot.as_ref() {
            return Ok(Arc::clone(data));
        }
        let data = Arc::new(loader()?);
        *slot = Some(Arc::clone(&data));
        tracing::debug!(entries = data.len(), "docs cache initialised");
        Ok(data)
    }

    pub fn set(&self, data: DocsData) -> Arc<DocsData> {
        let data = Arc::new(data);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&data));
        data
    }

    pub fn invalidate(&self) {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_initialized(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackageInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn data(name: &str) -> DocsData {
        DocsData::new(PackageInfo {
            name: name.to_string(),
            ..PackageInfo::default()
        })
    }

    #[test]
    fn initialises_once_then_reinitialises_after_invalidate() {
        let cache = DocsCache::new();
        let loads = AtomicUsize::new(0);
        let load = || -> Result<DocsData, ()> {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(data("utilkit"))
        };

        assert!(!cache.is_initialized());
        let first = cache.get_or_try_init(load).unwrap();
        let second = cache.get_or_try_init(load).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        cache.invalidate();
        assert!(cache.get().is_none());
        cache.get_or_try_init(load).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        // The old snapshot is still usable.
        assert_eq!(first.package_info.name, "utilkit");
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let cache = DocsCache::new();
        let result = cache.get_or_try_init(|| Err::<DocsData, _>("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(!cache.is_initialized());
    }

    #[test]
    fn set_replaces_snapshot() {
        let cache = DocsCache::new();
        cache.set(data("a"));
        cache.set(data("b"));
        assert_eq!(cache.get().unwrap().package_info.name, "b");
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(DocsCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache
                        .get_or_try_init(|| Ok::<_, ()>(data("shared")))
                        .unwrap()
                })
            })
            .collect();
        let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(snapshots.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
