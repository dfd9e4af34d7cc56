//! Donor Service - main application orchestrator.
//!
//! Coordinates the donor use cases over the driven ports:
//! 1. Read the current time from the `Clock`
//! 2. Apply domain rules (validation, donation-date checks)
//! 3. Persist through the `DonorStore`
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::ports::{Clock, DonorStore},
    domain::{BloodType, Donor, DonorPatch, SearchCriteria},
    error::DonorResult,
};

/// Form input for registering a donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonor {
    pub first_name: String,
    pub last_name: String,
    pub blood_type: String,
    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub active: bool,
    pub last_donation_date: Option<DateTime<Utc>>,
}

impl NewDonor {
    /// Active donor with no email and no donation on record.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        blood_type: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            blood_type: blood_type.into(),
            email: None,
            phone: phone.into(),
            city: city.into(),
            active: true,
            last_donation_date: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn last_donation_date(mut self, date: DateTime<Utc>) -> Self {
        self.last_donation_date = Some(date);
        self
    }
}

/// A donor together with its eligibility at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonorInfo {
    #[serde(flatten)]
    pub donor: Donor,
    pub eligible: bool,
    /// `None` when the donor has never donated.
    pub days_since_last_donation: Option<i64>,
}

impl DonorInfo {
    pub fn at(donor: Donor, now: DateTime<Utc>) -> Self {
        let eligible = donor.is_eligible(now);
        let days_since_last_donation = donor
            .last_donation_date()
            .map(|_| donor.days_since_last_donation(now));
        Self {
            donor,
            eligible,
            days_since_last_donation,
        }
    }

    pub fn last_donation_day(&self) -> Option<NaiveDate> {
        self.donor.last_donation_date().map(|d| d.date_naive())
    }
}

/// Aggregate counts over the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub active: usize,
    pub eligible: usize,
    /// Keyed by canonical blood type; unrecognised values are counted
    /// under `"unknown"`.
    pub by_blood_type: BTreeMap<String, usize>,
}

/// Main donor service.
pub struct DonorService {
    store: Box<dyn DonorStore>,
    clock: Box<dyn Clock>,
}

impl DonorService {
    /// Create a new donor service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use donatelife_core::application::DonorService;
    ///
    /// let service = DonorService::new(
    ///     store, // impl DonorStore
    ///     clock, // impl Clock
    /// );
    /// ```
    pub fn new(store: Box<dyn DonorStore>, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The time every rule in this service is evaluated against.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Register a new donor under a fresh id.
    ///
    /// A requested donation date that the donor refuses (inactive donor,
    /// future date) is dropped with a warning; the donor is still
    /// registered if every field validates.
    #[instrument(skip_all, fields(city = %new.city))]
    pub fn register(&self, new: NewDonor) -> DonorResult<Donor> {
        let now = self.clock.now();

        let mut donor = Donor::new(
            Uuid::new_v4(),
            new.first_name,
            new.last_name,
            new.blood_type,
            new.email,
            new.phone,
            new.city,
        );
        donor.set_active(new.active);

        if let Some(date) = new.last_donation_date {
            if let Err(reason) = donor.update_last_donation_date(date, now) {
                warn!(%reason, date = %date, "Initial donation date dropped");
            }
        }

        let violations = donor.validate(now);
        if !violations.is_empty() {
            debug!(count = violations.len(), "Registration rejected");
            return Err(violations.into());
        }

        self.store.insert(donor.clone())?;
        info!(id = %donor.id(), "Donor registered");
        Ok(donor)
    }

    /// Edit a donor's fields and optionally record a donation date.
    ///
    /// The store applies both changes to a copy and commits them together,
    /// so a rejected date or an invalid field leaves the stored donor
    /// untouched.
    #[instrument(skip(self, patch))]
    pub fn update(
        &self,
        id: Uuid,
        patch: DonorPatch,
        donation_date: Option<DateTime<Utc>>,
    ) -> DonorResult<Donor> {
        let updated = self
            .store
            .update(id, patch, donation_date, self.clock.now())?;

        info!("Donor updated");
        Ok(updated)
    }

    /// Record that a donor gave blood on `date`.
    #[instrument(skip(self))]
    pub fn record_donation(&self, id: Uuid, date: DateTime<Utc>) -> DonorResult<Donor> {
        let donor = self.store.record_donation(id, date, self.clock.now())?;
        info!("Donation recorded");
        Ok(donor)
    }

    /// Remove a donor from the registry.
    #[instrument(skip(self))]
    pub fn remove(&self, id: Uuid) -> DonorResult<Donor> {
        let donor = self.store.remove(id)?;
        info!("Donor removed");
        Ok(donor)
    }

    /// Look a donor up; `Ok(None)` when the id is unknown.
    pub fn find(&self, id: Uuid) -> DonorResult<Option<DonorInfo>> {
        let now = self.clock.now();
        Ok(self.store.find(id)?.map(|d| DonorInfo::at(d, now)))
    }

    /// Donors matching `criteria`, evaluated against the current time.
    #[instrument(skip(self))]
    pub fn search(&self, criteria: &SearchCriteria) -> DonorResult<Vec<DonorInfo>> {
        let now = self.clock.now();
        let found = self.store.search(criteria, now)?;
        debug!(matches = found.len(), "Search completed");
        Ok(found.into_iter().map(|d| DonorInfo::at(d, now)).collect())
    }

    /// Every donor, in registration order.
    pub fn list(&self) -> DonorResult<Vec<DonorInfo>> {
        let now = self.clock.now();
        Ok(self
            .store
            .list()?
            .into_iter()
            .map(|d| DonorInfo::at(d, now))
            .collect())
    }

    pub fn count(&self) -> DonorResult<usize> {
        self.store.len()
    }

    /// Counts of active and eligible donors, and donors per blood type.
    pub fn summary(&self) -> DonorResult<RegistrySummary> {
        let now = self.clock.now();
        let donors = self.store.list()?;

        let mut summary = RegistrySummary {
            total: donors.len(),
            ..RegistrySummary::default()
        };
        for donor in &donors {
            if donor.is_active() {
                summary.active += 1;
            }
            if donor.is_eligible(now) {
                summary.eligible += 1;
            }
            let key = BloodType::parse(donor.blood_type())
                .map_or_else(|| "unknown".to_string(), |bt| bt.to_string());
            *summary.by_blood_type.entry(key).or_default() += 1;
        }
        Ok(summary)
    }
}
