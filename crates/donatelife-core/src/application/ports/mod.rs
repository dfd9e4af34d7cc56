//! Application ports (traits) for external dependencies.
//!
//! Driven ports, called by the application and implemented in
//! `donatelife-adapters`:
//!
//! - `DonorStore`: donor storage and lookup
//! - `Clock`: the current time used by every eligibility rule

pub mod output;

pub use output::{Clock, DonorStore};
