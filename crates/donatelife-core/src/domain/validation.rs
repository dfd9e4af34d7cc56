//! Field-level rules shared by `Donor::validate` and the CLI's one-shot
//! `validate` command.

use chrono::{DateTime, Utc};

use crate::domain::{error::ValidationError, value_objects::BloodType};

/// Number of digits a phone number must have.
pub const PHONE_DIGITS: usize = 10;

/// Centralized donor field rules.
///
/// Each check is independent; callers collect every violation instead of
/// stopping at the first one.
pub struct DonorValidator;

impl DonorValidator {
    pub fn is_blank(value: &str) -> bool {
        value.trim().is_empty()
    }

    pub fn check_first_name(value: &str) -> Option<ValidationError> {
        Self::is_blank(value).then_some(ValidationError::MissingFirstName)
    }

    pub fn check_last_name(value: &str) -> Option<ValidationError> {
        Self::is_blank(value).then_some(ValidationError::MissingLastName)
    }

    pub fn check_blood_type(value: &str) -> Option<ValidationError> {
        BloodType::parse(value)
            .is_none()
            .then_some(ValidationError::InvalidBloodType)
    }

    /// Weak syntactic check: both `@` and `.` somewhere in the address.
    pub fn check_email(value: Option<&str>) -> Option<ValidationError> {
        match value {
            Some(email) if !Self::is_blank(email) => {
                let plausible = email.contains('@') && email.contains('.');
                (!plausible).then_some(ValidationError::InvalidEmail)
            }
            _ => None,
        }
    }

    pub fn check_phone(value: &str) -> Option<ValidationError> {
        if Self::is_blank(value) {
            return Some(ValidationError::MissingPhone);
        }
        let well_formed =
            value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit());
        (!well_formed).then_some(ValidationError::InvalidPhone)
    }

    pub fn check_city(value: &str) -> Option<ValidationError> {
        Self::is_blank(value).then_some(ValidationError::MissingCity)
    }

    pub fn check_donation_date(
        date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<ValidationError> {
        date.filter(|d| *d > now)
            .map(|_| ValidationError::FutureDonationDate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn blank_means_whitespace_only() {
        assert!(DonorValidator::is_blank(""));
        assert!(DonorValidator::is_blank("  \t"));
        assert!(!DonorValidator::is_blank(" x "));
    }

    #[test]
    fn phone_must_be_exactly_ten_ascii_digits() {
        assert_eq!(DonorValidator::check_phone("1234567890"), None);
        assert_eq!(
            DonorValidator::check_phone("123"),
            Some(ValidationError::InvalidPhone)
        );
        assert_eq!(
            DonorValidator::check_phone("123-456-7890"),
            Some(ValidationError::InvalidPhone)
        );
        assert_eq!(
            DonorValidator::check_phone("+11234567890"),
            Some(ValidationError::InvalidPhone)
        );
        // Non-ASCII digits are rejected even when there are ten of them.
        assert_eq!(
            DonorValidator::check_phone("١٢٣٤٥٦٧٨٩٠"),
            Some(ValidationError::InvalidPhone)
        );
        assert_eq!(
            DonorValidator::check_phone("   "),
            Some(ValidationError::MissingPhone)
        );
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        assert_eq!(DonorValidator::check_email(None), None);
        assert_eq!(DonorValidator::check_email(Some("  ")), None);
        assert_eq!(DonorValidator::check_email(Some("a@b.c")), None);
        assert_eq!(
            DonorValidator::check_email(Some("ab.c")),
            Some(ValidationError::InvalidEmail)
        );
        assert_eq!(
            DonorValidator::check_email(Some("a@bc")),
            Some(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn donation_date_may_equal_now_but_not_exceed_it() {
        let now = Utc::now();
        assert_eq!(DonorValidator::check_donation_date(None, now), None);
        assert_eq!(DonorValidator::check_donation_date(Some(now), now), None);
        assert_eq!(
            DonorValidator::check_donation_date(Some(now + Duration::seconds(1)), now),
            Some(ValidationError::FutureDonationDate)
        );
    }
}
