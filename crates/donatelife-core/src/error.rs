//! Unified error handling for DonateLife Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, DonationDateError, RegistryError, ValidationError};

/// Root error type for DonateLife Core operations.
#[derive(Debug, Error, Clone)]
pub enum DonorError {
    /// Business rule violations (validation, duplicate id, unknown donor).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration failures (store lock poisoned and the like).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl From<RegistryError> for DonorError {
    fn from(err: RegistryError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<DonationDateError> for DonorError {
    fn from(err: DonationDateError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<Vec<ValidationError>> for DonorError {
    fn from(violations: Vec<ValidationError>) -> Self {
        Self::Domain(DomainError::Validation(violations))
    }
}

impl DonorError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Validation violations carried by this error, if any.
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::Domain(DomainError::Validation(v))
            | Self::Domain(DomainError::Registry(RegistryError::Invalid { violations: v, .. })) => {
                v
            }
            _ => &[],
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type DonorResult<T> = Result<T, DonorError>;
