use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// Hands out one mutual-exclusion lock per storage resource.
///
/// Locks are keyed by a stable hash of the resource path, so every writer
/// of the same file contends on the same lock regardless of which component
/// created its storage handle. Acquisition is a blocking wait; release is
/// by RAII on every exit path, including error paths.
#[derive(Debug, Default)]
pub struct FileLockRegistry {
    locks: StdMutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl FileLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Get the lock guarding the given resource path, creating it on first use.
    pub fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let key = Self::resource_key(path);
        let mut locks = match self.locks.lock() {
            Ok(guard) => guard,
            // A poisoned registry still hands out valid locks; the map itself
            // is only ever inserted into.
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.entry(key).or_default().clone()
    }

    fn resource_key(path: &Path) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        path.hash(&mut hasher);
        hasher.finish()
    }
}
