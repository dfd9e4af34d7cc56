pub mod donor;
pub mod registry;

pub use donor::{Donor, DonorPatch, MIN_DAYS_BETWEEN_DONATIONS, NEVER_DONATED};
pub use registry::{DonorRegistry, SearchCriteria};
