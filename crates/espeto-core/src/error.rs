//! # Error Types
//!
//! Domain-specific error types for espeto-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  espeto-core (this file)                                            │
//! │  └── ValidationError  - input rejected before any write             │
//! │                                                                     │
//! │  espeto-db                                                          │
//! │  └── DbError          - storage failures, propagated unchanged      │
//! │                                                                     │
//! │  espeto-engine                                                      │
//! │  └── EngineError      - NotFound | Validation | Db, what the UI     │
//! │                         layer sees                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pure computations in this crate are total and never fail; the only
//! errors originating here are validation rejections.

use thiserror::Error;

/// Input validation errors.
///
/// Raised before business logic runs; nothing has been written when one
/// of these surfaces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
