//! Error types for the session engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors the engine can surface to its host.
///
/// Almost everything else is normalized instead of raised: stale targets are
/// nulled, out-of-range counts are clamped, mismatched payloads are ignored.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The expanded role pool does not match the seat count. This is a
    /// setup-time contract violation and must be fixed before dealing.
    #[error("role pool has {pool_size} cards for {seat_count} seats")]
    RolePoolMismatch {
        /// Size of the expanded enabled-role pool.
        pool_size: usize,
        /// Number of configured seats.
        seat_count: usize,
    },

    /// A snapshot store failed to load or persist the session.
    #[error("storage error: {0}")]
    Storage(String),
}
