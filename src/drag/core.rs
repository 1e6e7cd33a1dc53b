//! Drag classification state machine.
//!
//! A session is `Idle` or `Dragging(payload)`. The payload carries the
//! entity id together with an explicit kind tag decided once at drag
//! start; drop handlers dispatch on that tag and never inspect the
//! payload's shape. Dropping resolves to a `DropAction`, a pure
//! description of the transition to run; the session itself never
//! mutates layout state, so a cancelled drag is always a no-op.

use crate::catalog::{EntityId, EntityKind};
use crate::topology::Slot;

/// The entity being dragged, tagged with its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub entity: EntityId,
    pub kind: EntityKind,
}

/// What the pointer was released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A grid or border cell.
    Slot(Slot),
    /// A placed aisle's card; only meaningful for product drags.
    Aisle(EntityId),
    /// Released outside every droppable region.
    None,
}

/// Transition resolved from a drop, to be executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    PlaceAt { entity: EntityId, slot: Slot },
    AddToAisle { product: EntityId, aisle: EntityId },
    /// No valid target or class mismatch: return to idle untouched.
    Cancel,
}

/// Short-lived state for the drag currently in flight.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DragSession {
    active: Option<DragPayload>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&DragPayload> {
        self.active.as_ref()
    }

    /// Enter `Dragging`. A drag started while another is in flight
    /// supersedes it; pointer capture makes that unreachable in
    /// practice.
    pub fn begin(&mut self, entity: impl Into<EntityId>, kind: EntityKind) {
        self.active = Some(DragPayload {
            entity: entity.into(),
            kind,
        });
    }

    /// Leave `Dragging` and resolve the transition for the target.
    /// Returns `Cancel` when idle, when the target is absent, or when
    /// the target's slot class is not permitted for the payload's kind.
    pub fn drop_on(&mut self, target: DropTarget) -> DropAction {
        let Some(payload) = self.active.take() else {
            return DropAction::Cancel;
        };
        resolve(payload, target)
    }

    /// Explicit cancel (escape key, pointer lost). Always returns to
    /// idle.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

fn resolve(payload: DragPayload, target: DropTarget) -> DropAction {
    match (payload.kind, target) {
        (EntityKind::Aisle, DropTarget::Slot(slot)) if slot.is_interior() => DropAction::PlaceAt {
            entity: payload.entity,
            slot,
        },
        (EntityKind::Feature, DropTarget::Slot(slot)) if slot.is_border() => DropAction::PlaceAt {
            entity: payload.entity,
            slot,
        },
        (EntityKind::Product, DropTarget::Aisle(aisle)) => DropAction::AddToAisle {
            product: payload.entity,
            aisle,
        },
        _ => DropAction::Cancel,
    }
}
