//! In-memory spatial placement engine for a grocery-store layout
//! editor.
//!
//! The engine tracks which entity (aisle, store feature, product)
//! occupies which slot (interior grid cell or border cell) and applies
//! the drag-and-drop transitions: place with same-class swap, explicit
//! swap, unplace, entity removal, product shelving and append-only
//! topology growth. Persistence, rendering and the surrounding CRUD
//! surface live outside this crate; the only wire format owned here is
//! the canonical store document in `store`.

pub mod catalog;
pub mod containment;
pub mod drag;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod placement;
pub mod store;
pub mod topology;

pub use catalog::{Aisle, Catalog, EntityId, EntityKind, FeatureType, Product, StoreFeature};
pub use containment::Containment;
pub use drag::{DragPayload, DragSession, DropAction, DropTarget};
pub use engine::{DropOutcome, EngineConfig, LayoutEngine};
pub use error::{PlacementError, Result};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{EngineMetrics, MetricSnapshot};
pub use placement::PlacementMap;
pub use store::{
    AisleRecord, FeatureRecord, ProductRecord, SaveTracker, StoreRecord, hydrate, serialize,
};
pub use topology::{BorderRef, Side, Slot, Topology};
