use super::LockManager;

/// Holds a name's row lock until dropped.
///
/// Release happens on every exit path, including early `?` returns and
/// panics unwinding through the holder.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, M: LockManager + ?Sized> {
    manager: &'a M,
    key: String,
}

impl<'a, M: LockManager + ?Sized> LockGuard<'a, M> {
    pub(crate) fn new(manager: &'a M, key: &str) -> Self {
        Self {
            manager,
            key: key.to_string(),
        }
    }
}

impl<M: LockManager + ?Sized> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        if let Err(e) = self.manager.unlock(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to release row lock");
        }
    }
}
