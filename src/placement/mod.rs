//! Placement module orchestrator.

mod core;

pub use core::PlacementMap;
