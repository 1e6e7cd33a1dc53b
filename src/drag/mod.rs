//! Drag module orchestrator.

mod core;

pub use core::{DragPayload, DragSession, DropAction, DropTarget};
