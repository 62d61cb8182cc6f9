use thiserror::Error;

/// Errors raised by lookup and strict-insertion operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum MemorizeError {
    /// No entry exists for the requested key. The null key counts as absent
    /// while its slot is unoccupied.
    #[error("key not found")]
    KeyNotFound,
    /// Strict insertion was attempted for a key that already has an entry.
    #[error("duplicate key")]
    DuplicateKey,
}
