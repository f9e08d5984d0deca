use thiserror::Error;

/// Error type for row lock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// A thread panicked while holding the lock table.
    #[error("row lock table poisoned")]
    Poisoned,
}
