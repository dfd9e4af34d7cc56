//! The donor entity.
//!
//! ## Invariants
//!
//! 1. `id` is fixed at construction; there is no setter.
//! 2. `last_donation_date` only moves through `update_last_donation_date`,
//!    which refuses inactive donors and dates later than `now`.
//! 3. Eligibility is never stored. It is recomputed from `active`,
//!    `last_donation_date` and the caller-supplied `now` on every query.
//!
//! Every other field is mutated unchecked. Invalid state is representable
//! and only surfaced by `validate()`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    error::{DonationDateError, ValidationError},
    validation::DonorValidator as rules,
};

/// A donor becomes eligible again once strictly more than this many whole
/// days have passed since their last donation.
pub const MIN_DAYS_BETWEEN_DONATIONS: i64 = 90;

/// Returned by `days_since_last_donation` for donors with no donation on
/// record, so they compare as maximally overdue.
pub const NEVER_DONATED: i64 = i64::MAX;

/// A registered blood donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Donor {
    id: Uuid,
    first_name: String,
    last_name: String,
    blood_type: String,
    email: Option<String>,
    phone: String,
    city: String,
    last_donation_date: Option<DateTime<Utc>>,
    active: bool,
}

impl Donor {
    /// Create an active donor with no donation on record.
    ///
    /// Nothing is validated here; call [`Donor::validate`] before trusting
    /// the fields.
    pub fn new(
        id: Uuid,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        blood_type: impl Into<String>,
        email: Option<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            blood_type: blood_type.into(),
            email,
            phone: phone.into(),
            city: city.into(),
            last_donation_date: None,
            active: true,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn blood_type(&self) -> &str {
        &self.blood_type
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn last_donation_date(&self) -> Option<DateTime<Utc>> {
        self.last_donation_date
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ── Unchecked setters ─────────────────────────────────────────────────

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn set_blood_type(&mut self, blood_type: impl Into<String>) {
        self.blood_type = blood_type.into();
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    // ── Behaviour ─────────────────────────────────────────────────────────

    /// Check every field rule and return all violations, in form order.
    ///
    /// An empty vector means the donor is valid at `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Vec<ValidationError> {
        [
            rules::check_first_name(&self.first_name),
            rules::check_last_name(&self.last_name),
            rules::check_blood_type(&self.blood_type),
            rules::check_email(self.email.as_deref()),
            rules::check_phone(&self.phone),
            rules::check_city(&self.city),
            rules::check_donation_date(self.last_donation_date, now),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// [`Donor::validate`] rendered as the messages shown to a user.
    pub fn validation_messages(&self, now: DateTime<Utc>) -> Vec<String> {
        self.validate(now).iter().map(ToString::to_string).collect()
    }

    /// Whether this donor may donate at `now`.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        match self.last_donation_date {
            None => true,
            Some(date) => (now - date).num_days() > MIN_DAYS_BETWEEN_DONATIONS,
        }
    }

    /// Whole days from the last donation to `now`, or [`NEVER_DONATED`].
    pub fn days_since_last_donation(&self, now: DateTime<Utc>) -> i64 {
        self.last_donation_date
            .map_or(NEVER_DONATED, |date| (now - date).num_days())
    }

    /// Record a donation date.
    ///
    /// Refused, leaving the donor untouched, when the donor is inactive or
    /// `date` is later than `now`.
    pub fn update_last_donation_date(
        &mut self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), DonationDateError> {
        if !self.active {
            return Err(DonationDateError::Inactive);
        }
        if date > now {
            return Err(DonationDateError::FutureDate);
        }
        self.last_donation_date = Some(date);
        Ok(())
    }

    /// Apply every field present in `patch`, unchecked.
    pub fn apply(&mut self, patch: DonorPatch) {
        let DonorPatch {
            first_name,
            last_name,
            blood_type,
            email,
            phone,
            city,
            active,
        } = patch;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = blood_type {
            self.blood_type = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = city {
            self.city = v;
        }
        if let Some(v) = active {
            self.active = v;
        }
    }
}

impl fmt::Display for Donor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Donor[ID={}, Name={} {}, BloodType={}, Email={}, Phone={}, City={}, \
             LastDonationDate={}, Active={}]",
            self.id,
            self.first_name,
            self.last_name,
            self.blood_type,
            self.email.as_deref().unwrap_or("N/A"),
            self.phone,
            self.city,
            self.last_donation_date
                .map_or_else(|| "Never".to_string(), |d| d.date_naive().to_string()),
            self.active,
        )
    }
}

/// A partial update to a donor's editable fields.
///
/// `None` leaves a field unchanged. For `email`, `Some(None)` clears the
/// address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub blood_type: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub active: Option<bool>,
}

impl DonorPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
