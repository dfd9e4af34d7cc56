//! DonateLife Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the DonateLife
//! donor registry, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         donatelife-cli (shell)          │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │             (DonorService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: DonorStore, Clock)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    donatelife-adapters (Infrastructure) │
//! │  (InMemoryDonorStore, SystemClock, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │   (Donor, DonorRegistry, BloodType)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use donatelife_core::domain::{Donor, DonorRegistry, SearchCriteria};
//! use uuid::Uuid;
//!
//! let mut registry = DonorRegistry::new();
//! let donor = Donor::new(Uuid::new_v4(), "Ada", "Lovelace", "O+", None, "1234567890", "London");
//! assert!(donor.validate(Utc::now()).is_empty());
//! registry.add(donor).unwrap();
//!
//! let found = registry.search(&SearchCriteria::new().blood_type("o+").eligible(true), Utc::now());
//! assert_eq!(found.len(), 1);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DonorInfo, DonorService, NewDonor, RegistrySummary,
        ports::{Clock, DonorStore},
    };
    pub use crate::domain::{
        BloodType, Donor, DonorPatch, DonorRegistry, SearchCriteria, ValidationError,
    };
    pub use crate::error::{DonorError, DonorResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
