//! Catalog module orchestrator.

mod core;

pub use core::{Aisle, Catalog, EntityId, EntityKind, FeatureType, Product, StoreFeature};
