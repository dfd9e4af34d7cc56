//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `donatelife-adapters` crate provides implementations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Donor, DonorPatch, SearchCriteria};
use crate::error::DonorResult;

/// Port for donor storage.
///
/// Implemented by:
/// - `donatelife_adapters::InMemoryDonorStore` (lock-protected registry)
///
/// ## Design Notes
///
/// - Reads return owned snapshots; edits go through `update` and
///   `record_donation` so the store can re-check its invariants.
/// - Every mutation is atomic with respect to other callers of the same
///   store.
#[cfg_attr(test, mockall::automock)]
pub trait DonorStore: Send + Sync {
    /// Add a donor. Fails with `RegistryError::DuplicateId` if the id is taken.
    fn insert(&self, donor: Donor) -> DonorResult<()>;

    /// Look a donor up by id.
    fn find(&self, id: Uuid) -> DonorResult<Option<Donor>>;

    /// Patch a donor and optionally set its last donation date, committing
    /// both or neither, and only if the result validates at `now`.
    fn update(
        &self,
        id: Uuid,
        patch: DonorPatch,
        donation_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DonorResult<Donor>;

    /// Set a donor's last donation date.
    fn record_donation(
        &self,
        id: Uuid,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DonorResult<Donor>;

    /// Remove a donor, returning the removed record.
    fn remove(&self, id: Uuid) -> DonorResult<Donor>;

    /// Donors matching `criteria` at `now`, in insertion order.
    fn search(&self, criteria: &SearchCriteria, now: DateTime<Utc>) -> DonorResult<Vec<Donor>>;

    /// Every donor, in insertion order.
    fn list(&self) -> DonorResult<Vec<Donor>>;

    /// Number of stored donors.
    fn len(&self) -> DonorResult<usize>;
}

/// Port for the current time.
///
/// Implemented by:
/// - `donatelife_adapters::SystemClock` (wall clock)
/// - `donatelife_adapters::FixedClock` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
