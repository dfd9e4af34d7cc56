//! Core domain layer for DonateLife.
//!
//! Pure business logic: the donor entity, its field rules, and the
//! in-memory registry.
//!
//! - **No I/O**: nothing here reads a clock, a file or the network. Every
//!   time-dependent rule takes `now` as an argument.
//! - **Synchronous**: no async, no locking. Thread-safety is an adapter
//!   concern.
//! - **Invalid state is representable**: setters never fail; `validate()`
//!   reports what is wrong.

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    Donor, DonorPatch, DonorRegistry, MIN_DAYS_BETWEEN_DONATIONS, NEVER_DONATED, SearchCriteria,
};
pub use error::{DomainError, DonationDateError, ErrorCategory, RegistryError, ValidationError};
pub use validation::{DonorValidator, PHONE_DIGITS};
pub use value_objects::BloodType;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 8, 0, 0).unwrap()
    }

    // ========================================================================
    // Registry + Donor together
    // ========================================================================

    #[test]
    fn eligible_o_positive_search_ignores_phone_validity() {
        let a = Donor::new(Uuid::new_v4(), "Amy", "Adams", "O+", None, "1234567890", "Kyiv");
        let mut b = Donor::new(Uuid::new_v4(), "Ben", "Brown", "o+", None, "123", "Kyiv");
        b.update_last_donation_date(now() - Duration::days(10), now())
            .unwrap();

        let mut registry = DonorRegistry::new();
        registry.add(a.clone()).unwrap();
        registry.add(b.clone()).unwrap();

        let found = registry.search(&SearchCriteria::new().blood_type("O+").eligible(true), now());
        assert_eq!(found, vec![&a]);

        assert_eq!(b.validate(now()), vec![ValidationError::InvalidPhone]);
        assert!(a.validate(now()).is_empty());
    }

    #[test]
    fn eligibility_changes_as_the_clock_moves() {
        let mut d = Donor::new(Uuid::new_v4(), "Cat", "Cole", "AB-", None, "0987654321", "Riga");
        d.update_last_donation_date(now(), now()).unwrap();

        let mut registry = DonorRegistry::new();
        registry.add(d).unwrap();
        let eligible = SearchCriteria::new().eligible(true);

        assert!(registry.search(&eligible, now() + Duration::days(90)).is_empty());
        assert_eq!(registry.search(&eligible, now() + Duration::days(91)).len(), 1);
    }

    #[test]
    fn blood_type_list_is_the_validation_whitelist() {
        for bt in BloodType::ALL {
            assert!(DonorValidator::check_blood_type(&bt.as_str().to_lowercase()).is_none());
        }
        assert!(DonorValidator::check_blood_type("AB").is_some());
    }
}
