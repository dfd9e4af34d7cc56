//! Application layer for DonateLife.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (DonorService)
//! - **Ports**: Interface definitions (traits) for the store and the clock
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{DonorInfo, DonorService, NewDonor, RegistrySummary};

pub use ports::{Clock, DonorStore};

pub use error::ApplicationError;
