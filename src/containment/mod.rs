//! Containment module orchestrator.

mod core;

pub use core::Containment;
