use std::collections::HashSet;
use std::sync::{Condvar, Mutex};

use super::{LockError, LockManager};

/// The set of names currently held, plus one `Condvar` every waiter parks
/// on.
///
/// A name is in the set only while someone holds it, so the table never
/// outgrows the number of in-flight upserts.
#[derive(Default)]
pub struct InMemoryLockManager {
    held: Mutex<HashSet<String>>,
    released: Condvar,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockManager for InMemoryLockManager {
    fn lock(&self, key: &str) -> Result<(), LockError> {
        let held = self.held.lock().map_err(|_| LockError::Poisoned)?;
        let mut held = self
            .released
            .wait_while(held, |held| held.contains(key))
            .map_err(|_| LockError::Poisoned)?;
        held.insert(key.to_string());
        Ok(())
    }

    fn unlock(&self, key: &str) -> Result<(), LockError> {
        let mut held = self.held.lock().map_err(|_| LockError::Poisoned)?;
        if held.remove(key) {
            // Waiters for other names share the condvar.
            self.released.notify_all();
        }
        Ok(())
    }
}
