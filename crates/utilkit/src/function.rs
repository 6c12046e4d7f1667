use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{LazyLock, Mutex, PoisonError};

/// A function whose results are cached per argument.
pub struct Memoized<A, R, F> {
    f: F,
    cache: Mutex<HashMap<A, R>>,
}

pub fn memoize<A, R, F>(f: F) -> Memoized<A, R, F>
where
    A: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&A) -> R,
{
    Memoized {
        f,
        cache: Mutex::new(HashMap::new()),
    }
}

impl<A, R, F> Memoized<A, R, F>
where
    A: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&A) -> R,
{
    pub fn call(&self, arg: A) -> R {
        if let Some(hit) = self.lock().get(&arg) {
            return hit.clone();
        }
        // The lock is released while `f` runs.
        let value = (self.f)(&arg);
        self.lock().entry(arg).or_insert(value).clone()
    }

    pub fn cached(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<A, R>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A function that runs at most once; later calls return the first result.
pub struct Once<R, F> {
    cell: LazyLock<R, F>,
}

pub fn once<R, F: FnOnce() -> R>(f: F) -> Once<R, F> {
    Once {
        cell: LazyLock::new(f),
    }
}

impl<R, F: FnOnce() -> R> Once<R, F> {
    pub fn call(&self) -> &R {
        LazyLock::force(&self.cell)
    }
}
