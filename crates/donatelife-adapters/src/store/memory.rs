//! In-memory donor store.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use donatelife_core::{
    application::{ApplicationError, ports::DonorStore},
    domain::{Donor, DonorPatch, DonorRegistry, RegistryError, SearchCriteria},
    error::DonorResult,
};

/// Thread-safe in-memory donor store.
///
/// Clones share the same registry. Contents are lost when the last clone
/// is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDonorStore {
    inner: Arc<RwLock<DonorRegistry>>,
}

impl InMemoryDonorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> DonorResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> DonorResult<RwLockReadGuard<'_, DonorRegistry>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLock.into())
    }

    fn write(&self) -> DonorResult<RwLockWriteGuard<'_, DonorRegistry>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLock.into())
    }
}

impl DonorStore for InMemoryDonorStore {
    fn insert(&self, donor: Donor) -> DonorResult<()> {
        let id = donor.id();
        self.write()?.add(donor)?;
        debug!(%id, "Stored donor");
        Ok(())
    }

    fn find(&self, id: Uuid) -> DonorResult<Option<Donor>> {
        Ok(self.read()?.find_by_id(id).cloned())
    }

    fn update(
        &self,
        id: Uuid,
        patch: DonorPatch,
        donation_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DonorResult<Donor> {
        let mut registry = self.write()?;
        let updated = registry.update(id, patch, donation_date, now)?.clone();
        debug!(%id, "Updated donor");
        Ok(updated)
    }

    fn record_donation(
        &self,
        id: Uuid,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DonorResult<Donor> {
        let mut registry = self.write()?;
        let donor = registry
            .find_by_id_mut(id)
            .ok_or(RegistryError::NotFound { id })?;
        donor.update_last_donation_date(date, now)?;
        debug!(%id, %date, "Recorded donation");
        Ok(donor.clone())
    }

    fn remove(&self, id: Uuid) -> DonorResult<Donor> {
        let removed = self.write()?.remove_by_id(id)?;
        debug!(%id, "Removed donor");
        Ok(removed)
    }

    fn search(&self, criteria: &SearchCriteria, now: DateTime<Utc>) -> DonorResult<Vec<Donor>> {
        Ok(self
            .read()?
            .search(criteria, now)
            .into_iter()
            .cloned()
            .collect())
    }

    fn list(&self) -> DonorResult<Vec<Donor>> {
        Ok(self.read()?.list().to_vec())
    }

    fn len(&self) -> DonorResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use donatelife_core::{
        domain::{DomainError, DonationDateError},
        error::{DonorError, ErrorCategory},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 8, 0, 0).unwrap()
    }

    fn donor(city: &str) -> Donor {
        Donor::new(Uuid::new_v4(), "Ann", "Lee", "AB-", None, "0123456789", city)
    }

    #[test]
    fn clones_share_contents() {
        let store = InMemoryDonorStore::new();
        let other = store.clone();

        store.insert(donor("Quito")).unwrap();

        assert_eq!(other.len().unwrap(), 1);
        assert!(!other.is_empty().unwrap());
    }

    #[test]
    fn duplicate_insert_is_a_conflict() {
        let store = InMemoryDonorStore::new();
        let d = donor("Quito");
        store.insert(d.clone()).unwrap();

        let err = store.insert(d).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn find_returns_a_snapshot() {
        let store = InMemoryDonorStore::new();
        let d = donor("Quito");
        let id = d.id();
        store.insert(d).unwrap();

        let mut copy = store.find(id).unwrap().unwrap();
        copy.set_city("Cuenca");

        assert_eq!(store.find(id).unwrap().unwrap().city(), "Quito");
        assert_eq!(store.find(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn record_donation_respects_donor_rules() {
        let store = InMemoryDonorStore::new();
        let mut inactive = donor("Quito");
        inactive.set_active(false);
        let id = inactive.id();
        store.insert(inactive).unwrap();

        let err = store
            .record_donation(id, now() - Duration::days(1), now())
            .unwrap_err();
        assert!(matches!(
            err,
            DonorError::Domain(DomainError::DonationDate(DonationDateError::Inactive))
        ));
        assert_eq!(store.find(id).unwrap().unwrap().last_donation_date(), None);

        let err = store
            .record_donation(Uuid::new_v4(), now(), now())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn update_and_remove_go_through_the_registry() {
        let store = InMemoryDonorStore::new();
        let d = donor("Quito");
        let id = d.id();
        store.insert(d).unwrap();

        let patch = DonorPatch {
            city: Some("Cuenca".into()),
            ..DonorPatch::default()
        };
        assert_eq!(store.update(id, patch, None, now()).unwrap().city(), "Cuenca");

        let patch = DonorPatch {
            city: Some("Loja".into()),
            ..DonorPatch::default()
        };
        let err = store
            .update(id, patch, Some(now() + Duration::days(1)), now())
            .unwrap_err();
        assert!(matches!(
            err,
            DonorError::Domain(DomainError::DonationDate(DonationDateError::FutureDate))
        ));
        assert_eq!(store.find(id).unwrap().unwrap().city(), "Cuenca");

        assert_eq!(store.remove(id).unwrap().id(), id);
        assert_eq!(store.remove(id).unwrap_err().category(), ErrorCategory::NotFound);
    }

    #[test]
    fn search_and_list_keep_insertion_order() {
        let store = InMemoryDonorStore::new();
        let a = donor("Quito");
        let b = donor("Lima");
        let c = donor("quito");
        for d in [&a, &b, &c] {
            store.insert(d.clone()).unwrap();
        }

        let found: Vec<_> = store
            .search(&SearchCriteria::new().city("QUITO"), now())
            .unwrap()
            .iter()
            .map(Donor::id)
            .collect();
        assert_eq!(found, [a.id(), c.id()]);

        let all: Vec<_> = store.list().unwrap().iter().map(Donor::id).collect();
        assert_eq!(all, [a.id(), b.id(), c.id()]);
    }
}
