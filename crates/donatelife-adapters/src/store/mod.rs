//! Donor store implementations.

mod memory;

pub use memory::InMemoryDonorStore;
