//! Infrastructure adapters for DonateLife.
//!
//! This crate implements the ports defined in `donatelife-core::application::ports`.

pub mod clock;
pub mod store;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use store::InMemoryDonorStore;
