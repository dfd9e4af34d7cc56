// ============================================================================
// domain/error.rs - DONOR DOMAIN ERRORS
// ============================================================================

use thiserror::Error;
use uuid::Uuid;

/// A single rule violation reported by `Donor::validate`.
///
/// The `Display` text is the message shown to the person filling in the
/// donor form, so it is phrased as an instruction rather than a diagnosis.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("First name is required")]
    MissingFirstName,

    #[error("Last name is required")]
    MissingLastName,

    #[error("Blood type is required and must be valid")]
    InvalidBloodType,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Phone number is required")]
    MissingPhone,

    #[error("Enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("City is required")]
    MissingCity,

    #[error("Enter a valid last donation date")]
    FutureDonationDate,
}

impl ValidationError {
    /// The donor field this violation refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingFirstName => "first_name",
            Self::MissingLastName => "last_name",
            Self::InvalidBloodType => "blood_type",
            Self::InvalidEmail => "email",
            Self::MissingPhone | Self::InvalidPhone => "phone",
            Self::MissingCity => "city",
            Self::FutureDonationDate => "last_donation_date",
        }
    }
}

/// Why `Donor::update_last_donation_date` refused a date.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DonationDateError {
    #[error("donor is inactive; donation date cannot be updated")]
    Inactive,

    #[error("donation date is in the future")]
    FutureDate,
}

/// Registry mutation and lookup failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a donor with id {id} is already registered")]
    DuplicateId { id: Uuid },

    #[error("no donor with id {id}")]
    NotFound { id: Uuid },

    #[error("donor {id} failed validation: {}", join_messages(.violations))]
    Invalid {
        id: Uuid,
        violations: Vec<ValidationError>,
    },
}

fn join_messages(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    DonationDate(#[from] DonationDateError),

    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Registry(RegistryError::DuplicateId { .. }) => vec![
                "Each donor must have a unique id".into(),
                "Use 'show <ID>' to inspect the existing record".into(),
            ],
            Self::Registry(RegistryError::NotFound { .. }) => vec![
                "Check the donor id".into(),
                "Use 'list' to see registered donors".into(),
            ],
            Self::Registry(RegistryError::Invalid { violations, .. })
            | Self::Validation(violations) => {
                violations.iter().map(|v| format!("{}: {v}", v.field())).collect()
            }
            Self::DonationDate(DonationDateError::Inactive) => vec![
                "Reactivate the donor first: update <ID> --active true".into(),
            ],
            Self::DonationDate(DonationDateError::FutureDate) => vec![
                "Donation dates cannot be later than today".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Registry(RegistryError::DuplicateId { .. }) => ErrorCategory::Conflict,
            Self::Registry(RegistryError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Registry(RegistryError::Invalid { .. }) | Self::Validation(_) => {
                ErrorCategory::Validation
            }
            Self::DonationDate(DonationDateError::Inactive) => ErrorCategory::Conflict,
            Self::DonationDate(DonationDateError::FutureDate) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
}
