use thiserror::Error;

use crate::catalog::EntityKind;
use crate::topology::Slot;

/// Unified result type for the placement engine.
pub type Result<T> = std::result::Result<T, PlacementError>;

/// Failures surfaced by engine transitions.
///
/// Every operation is transactional: a returned error means the layout
/// state is exactly what it was before the call.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("{kind} `{entity}` cannot occupy {slot}")]
    InvalidSlotClass {
        entity: String,
        kind: EntityKind,
        slot: Slot,
    },
    #[error("entity `{0}` is not placed")]
    NotPlaced(String),
    #[error("product `{product}` is not contained in aisle `{aisle}`")]
    NotContained { product: String, aisle: String },
    #[error("entity `{0}` is not registered")]
    UnknownEntity(String),
    #[error("{slot} is outside the current topology")]
    TopologyOutOfRange { slot: Slot },
    #[error("malformed store record: {0}")]
    Hydrate(String),
}
