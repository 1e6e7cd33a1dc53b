//! Store module orchestrator.

mod core;

pub use core::{
    AisleRecord, FeatureRecord, ProductRecord, SaveTracker, StoreRecord, hydrate, serialize,
};
