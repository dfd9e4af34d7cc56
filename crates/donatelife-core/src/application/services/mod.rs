//! Application services - orchestrate use cases.

pub mod donor_service;

pub use donor_service::{DonorInfo, DonorService, NewDonor, RegistrySummary};
