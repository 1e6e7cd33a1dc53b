//! Topology module orchestrator.
//!
//! Downstream modules import slot types from here while the derivation
//! rules live in the private `core` module.

mod core;

pub use core::{BorderRef, Side, Slot, Topology};
