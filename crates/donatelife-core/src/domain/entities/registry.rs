use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    entities::donor::{Donor, DonorPatch},
    error::{DomainError, RegistryError},
};

/// Insertion-ordered collection of donors, keyed by id.
///
/// Invariant: at most one donor per id. Lookups are linear scans; there is
/// no secondary index.
#[derive(Debug, Clone, Default)]
pub struct DonorRegistry {
    donors: Vec<Donor>,
}

impl DonorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a donor unless its id is already taken.
    pub fn add(&mut self, donor: Donor) -> Result<(), RegistryError> {
        if self.contains(donor.id()) {
            return Err(RegistryError::DuplicateId { id: donor.id() });
        }
        self.donors.push(donor);
        Ok(())
    }

    /// Remove the record matching `donor`'s id.
    pub fn remove(&mut self, donor: &Donor) -> Result<Donor, RegistryError> {
        self.remove_by_id(donor.id())
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<Donor, RegistryError> {
        let index = self
            .position(id)
            .ok_or(RegistryError::NotFound { id })?;
        Ok(self.donors.remove(index))
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Donor> {
        self.donors.iter().find(|d| d.id() == id)
    }

    /// Mutable access to a stored donor. Changes apply to the registry's
    /// own record; the id itself cannot be changed.
    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Donor> {
        self.donors.iter_mut().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.position(id).is_some()
    }

    /// Donors matching every criterion that is set, in insertion order.
    pub fn search(&self, criteria: &SearchCriteria, now: DateTime<Utc>) -> Vec<&Donor> {
        self.donors
            .iter()
            .filter(|d| criteria.matches(d, now))
            .collect()
    }

    /// Read-only view of every donor, in insertion order.
    pub fn list(&self) -> &[Donor] {
        &self.donors
    }

    /// Apply `patch`, then `donation_date` if given, to a copy of the donor
    /// and commit it only if both steps succeed and the result validates at
    /// `now`.
    pub fn update(
        &mut self,
        id: Uuid,
        patch: DonorPatch,
        donation_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<&Donor, DomainError> {
        let index = self
            .position(id)
            .ok_or(RegistryError::NotFound { id })?;

        let mut candidate = self.donors[index].clone();
        candidate.apply(patch);
        if let Some(date) = donation_date {
            candidate.update_last_donation_date(date, now)?;
        }

        let violations = candidate.validate(now);
        if !violations.is_empty() {
            return Err(RegistryError::Invalid { id, violations }.into());
        }

        self.donors[index] = candidate;
        Ok(&self.donors[index])
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.donors.iter().position(|d| d.id() == id)
    }
}

/// Filter for [`DonorRegistry::search`].
///
/// Unset (or blank) criteria match everything. String criteria are
/// case-insensitive exact matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub blood_type: Option<String>,
    pub city: Option<String>,
    pub eligible: Option<bool>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blood_type(mut self, blood_type: impl Into<String>) -> Self {
        self.blood_type = Some(blood_type.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn eligible(mut self, eligible: bool) -> Self {
        self.eligible = Some(eligible);
        self
    }

    pub fn matches(&self, donor: &Donor, now: DateTime<Utc>) -> bool {
        text_matches(self.blood_type.as_deref(), donor.blood_type())
            && text_matches(self.city.as_deref(), donor.city())
            && self
                .eligible
                .is_none_or(|wanted| donor.is_eligible(now) == wanted)
    }
}

fn text_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(w) if !w.trim().is_empty() => w.to_lowercase() == actual.to_lowercase(),
        _ => true,
    }
}
