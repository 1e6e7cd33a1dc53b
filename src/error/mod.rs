//! Error module orchestrator; the variants live in the private `types`
//! module and are re-exported here.

mod types;

pub use types::{PlacementError, Result};
