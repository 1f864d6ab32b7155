//! # Engine Error Types

use thiserror::Error;

use espeto_core::ValidationError;
use espeto_db::DbError;

/// Errors surfaced by engine operations.
///
/// Validation failures and storage failures keep their own variants so
/// a frontend can show "fix your input" and "something broke" differently.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input failed a business rule before touching storage.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Storage failure, propagated unchanged.
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

impl EngineError {
    /// Creates a NotFound error for a given entity type and key.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
