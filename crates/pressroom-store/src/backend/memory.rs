//! In-memory object client
//!
//! Backs the `memory` backend and tests. Clones share the same objects, and
//! `set_available(false)` makes every request fail as an outage would.

use crate::backend::object::ObjectClient;
use crate::backend::CreateOutcome;
use crate::errors::{lock_poisoned, store_unavailable, Result};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    available: AtomicBool,
}

#[derive(Debug, Clone)]
pub struct MemoryObjectClient {
    inner: Arc<Inner>,
}

impl Default for MemoryObjectClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryObjectClient {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                objects: Mutex::new(BTreeMap::new()),
                available: AtomicBool::new(true),
            }),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Place an object directly, replacing any existing one. Test seeding only.
    pub fn insert(&self, key: &str, bytes: &[u8]) {
        if let Ok(mut objects) = self.inner.objects.lock() {
            objects.insert(key.to_string(), bytes.to_vec());
        }
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.objects.lock().ok()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self, operation: &str) -> Result<()> {
        if self.inner.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(store_unavailable(operation, self.name(), "simulated outage"))
        }
    }
}

impl ObjectClient for MemoryObjectClient {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn list_keys(&self, prefix: &str, _timeout: Duration) -> Result<Vec<String>> {
        self.ensure_available("object_list")?;
        let objects = self
            .inner
            .objects
            .lock()
            .map_err(|_| lock_poisoned("object_list"))?;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn get_object(&self, key: &str, _timeout: Duration) -> Result<Option<Vec<u8>>> {
        self.ensure_available("object_read")?;
        let objects = self
            .inner
            .objects
            .lock()
            .map_err(|_| lock_poisoned("object_read"))?;
        Ok(objects.get(key).cloned())
    }

    fn put_if_absent(&self, key: &str, bytes: &[u8], _timeout: Duration) -> Result<CreateOutcome> {
        self.ensure_available("object_create")?;
        let mut objects = self
            .inner
            .objects
            .lock()
            .map_err(|_| lock_poisoned("object_create"))?;
        if objects.contains_key(key) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        objects.insert(key.to_string(), bytes.to_vec());
        Ok(CreateOutcome::Created)
    }
}
