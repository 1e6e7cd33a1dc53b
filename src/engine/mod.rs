//! Engine module orchestrator.

mod core;

pub use core::{DropOutcome, EngineConfig, LayoutEngine};
