//! Layout engine - the single owner of the editing session's state.
//!
//! All transitions run synchronously through the methods here: place,
//! swap, unplace, entity removal, containment moves, topology growth
//! and the drag lifecycle. Each operation validates its preconditions
//! before touching any map, so a returned error always means the state
//! is unchanged. Applied and rejected transitions are reported to the
//! configured logger and metrics accumulator.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use crate::catalog::{Aisle, Catalog, EntityId, EntityKind, Product, StoreFeature};
use crate::containment::Containment;
use crate::drag::{DragSession, DropAction, DropTarget};
use crate::error::{PlacementError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::EngineMetrics;
use crate::placement::PlacementMap;
use crate::topology::{Slot, Topology};

/// Configuration knobs for an editing session.
#[derive(Clone)]
pub struct EngineConfig {
    /// Optional structured logger used by the engine.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the embedding application.
    pub metrics: Option<Arc<Mutex<EngineMetrics>>>,
    /// Target field used when emitting metric snapshots.
    pub metrics_target: String,
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("logger", &self.logger.is_some())
            .field("metrics", &self.metrics.is_some())
            .field("metrics_target", &self.metrics_target)
            .finish()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_target: "storeplan::engine.metrics".to_string(),
        }
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(EngineMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<EngineMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// What a finished drag resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed,
    AddedToAisle,
    Cancelled,
}

#[derive(Debug)]
pub struct LayoutEngine {
    catalog: Catalog,
    topology: Topology,
    placement: PlacementMap,
    containment: Containment,
    drag: DragSession,
    config: EngineConfig,
    started: Instant,
}

impl LayoutEngine {
    pub fn new(spots: usize) -> Self {
        Self::with_catalog(Catalog::new(), Topology::new(spots))
    }

    pub fn with_catalog(catalog: Catalog, topology: Topology) -> Self {
        Self {
            catalog,
            topology,
            placement: PlacementMap::new(),
            containment: Containment::new(),
            drag: DragSession::new(),
            config: EngineConfig::new(),
            started: Instant::now(),
        }
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn placement(&self) -> &PlacementMap {
        &self.placement
    }

    pub fn containment(&self) -> &Containment {
        &self.containment
    }

    // --- catalog lifecycle -------------------------------------------------

    /// Register a new aisle; it starts unplaced.
    pub fn add_aisle(&mut self, aisle: Aisle) {
        self.log(
            LogLevel::Debug,
            "entity_registered",
            [
                json_kv("entity", json!(aisle.id.clone())),
                json_kv("kind", json!("aisle")),
            ],
        );
        self.catalog.insert_aisle(aisle);
    }

    /// Register a new store feature; it starts unplaced.
    pub fn add_feature(&mut self, feature: StoreFeature) {
        self.log(
            LogLevel::Debug,
            "entity_registered",
            [
                json_kv("entity", json!(feature.id.clone())),
                json_kv("kind", json!("feature")),
            ],
        );
        self.catalog.insert_feature(feature);
    }

    /// Register a new product; it starts in the catalog, uncontained.
    pub fn add_product(&mut self, product: Product) {
        self.log(
            LogLevel::Debug,
            "entity_registered",
            [
                json_kv("entity", json!(product.id.clone())),
                json_kv("kind", json!("product")),
            ],
        );
        self.catalog.insert_product(product);
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.catalog.rename(id, name)
    }

    /// Delete an entity from the catalog. An aisle releases its
    /// products to the catalog first; a product leaves its aisle; both
    /// kinds of placed entity vacate their slot.
    pub fn remove_entity(&mut self, id: &str) -> Result<()> {
        let kind = match self.catalog.kind_of(id) {
            Ok(kind) => kind,
            Err(err) => return Err(self.reject(err)),
        };

        let mut released = 0usize;
        match kind {
            EntityKind::Aisle => {
                released = self.containment.drain_aisle(id).len();
                self.placement.remove_entity(id);
            }
            EntityKind::Feature => {
                self.placement.remove_entity(id);
            }
            EntityKind::Product => {
                self.containment.remove_product(id);
            }
        }
        self.catalog.remove(id)?;

        self.log(
            LogLevel::Info,
            "entity_removed",
            [
                json_kv("entity", json!(id)),
                json_kv("kind", json!(kind.to_string())),
                json_kv("released_products", json!(released)),
            ],
        );
        Ok(())
    }

    // --- placement ---------------------------------------------------------

    /// Put an entity at a slot. If the slot is taken by a same-class
    /// entity the two trade: the occupant moves to the dragged entity's
    /// former slot when it had one, otherwise the occupant becomes
    /// unplaced.
    pub fn place(&mut self, entity: &str, slot: Slot) -> Result<()> {
        if let Err(err) = self.check_placeable(entity, slot) {
            return Err(self.reject(err));
        }

        let prior = self.placement.slot_of(entity);
        let displaced = self.placement.assign(entity, slot);

        match (&displaced, prior) {
            (Some(other), Some(prior_slot)) => {
                self.placement.assign(other, prior_slot);
                self.with_metrics(|m| m.record_swap());
                self.log(
                    LogLevel::Info,
                    "swapped",
                    [
                        json_kv("entity", json!(entity)),
                        json_kv("slot", json!(slot.to_string())),
                        json_kv("displaced", json!(other.clone())),
                        json_kv("displaced_to", json!(prior_slot.to_string())),
                    ],
                );
            }
            (Some(other), None) => {
                self.with_metrics(|m| m.record_placement());
                self.log(
                    LogLevel::Info,
                    "placed",
                    [
                        json_kv("entity", json!(entity)),
                        json_kv("slot", json!(slot.to_string())),
                        json_kv("displaced", json!(other.clone())),
                    ],
                );
            }
            (None, _) => {
                self.with_metrics(|m| m.record_placement());
                self.log(
                    LogLevel::Info,
                    "placed",
                    [
                        json_kv("entity", json!(entity)),
                        json_kv("slot", json!(slot.to_string())),
                    ],
                );
            }
        }
        Ok(())
    }

    /// Exchange the slots of two placed entities of the same class.
    pub fn swap(&mut self, a: &str, b: &str) -> Result<()> {
        let result = self.check_swappable(a, b);
        let (slot_a, slot_b) = match result {
            Ok(slots) => slots,
            Err(err) => return Err(self.reject(err)),
        };

        self.placement.assign(a, slot_b);
        self.placement.assign(b, slot_a);
        self.with_metrics(|m| m.record_swap());
        self.log(
            LogLevel::Info,
            "swapped",
            [
                json_kv("entity", json!(a)),
                json_kv("slot", json!(slot_b.to_string())),
                json_kv("displaced", json!(b)),
                json_kv("displaced_to", json!(slot_a.to_string())),
            ],
        );
        Ok(())
    }

    /// Clear an entity's slot, keeping it registered. No-op when the
    /// entity is already unplaced.
    pub fn unplace(&mut self, entity: &str) -> Result<()> {
        if !self.catalog.contains(entity) {
            return Err(self.reject(PlacementError::UnknownEntity(entity.to_string())));
        }
        if let Some(slot) = self.placement.remove_entity(entity) {
            self.with_metrics(|m| m.record_unplacement());
            self.log(
                LogLevel::Info,
                "unplaced",
                [
                    json_kv("entity", json!(entity)),
                    json_kv("slot", json!(slot.to_string())),
                ],
            );
        }
        Ok(())
    }

    /// Append interior spots. Existing placements keep their slots; any
    /// border feature whose index falls outside the re-derived side
    /// length is unplaced and reported back so the caller can warn.
    pub fn grow(&mut self, extra: usize) -> Vec<EntityId> {
        self.topology = self.topology.grow(extra);
        let orphaned = self.reconcile_border();
        self.with_metrics(|m| m.record_orphaned(orphaned.len()));
        self.log(
            LogLevel::Info,
            "topology_grown",
            [
                json_kv("spots", json!(self.topology.spots())),
                json_kv("columns", json!(self.topology.columns())),
                json_kv("rows", json!(self.topology.rows())),
                json_kv("orphaned", json!(orphaned.clone())),
            ],
        );
        orphaned
    }

    fn reconcile_border(&mut self) -> Vec<EntityId> {
        let stale: Vec<EntityId> = self
            .placement
            .iter()
            .filter(|(_, slot)| !self.topology.contains(*slot))
            .map(|(entity, _)| entity.clone())
            .collect();
        for entity in &stale {
            self.placement.remove_entity(entity);
        }
        stale
    }

    // --- containment -------------------------------------------------------

    /// Move a product into a placed aisle. A product already shelved
    /// elsewhere is relocated, not duplicated.
    pub fn add_product_to_aisle(&mut self, product: &str, aisle: &str) -> Result<()> {
        if let Err(err) = self.check_containable(product, aisle) {
            return Err(self.reject(err));
        }

        let prior = self.containment.add(product, aisle);
        self.with_metrics(|m| m.record_containment_move());
        self.log(
            LogLevel::Info,
            "product_shelved",
            [
                json_kv("product", json!(product)),
                json_kv("aisle", json!(aisle)),
                json_kv("moved_from", json!(prior)),
            ],
        );
        Ok(())
    }

    /// Containment restore path for hydration. Skips the placed-aisle
    /// drop policy: a saved layout may hold products in an aisle that
    /// was unplaced after they were shelved.
    pub(crate) fn restore_containment(&mut self, product: &str, aisle: &str) {
        self.containment.add(product, aisle);
    }

    /// Return a product from an aisle to the catalog.
    pub fn remove_product_from_aisle(&mut self, product: &str, aisle: &str) -> Result<()> {
        if let Err(err) = self.containment.remove(product, aisle) {
            return Err(self.reject(err));
        }
        self.with_metrics(|m| m.record_containment_move());
        self.log(
            LogLevel::Info,
            "product_unshelved",
            [
                json_kv("product", json!(product)),
                json_kv("aisle", json!(aisle)),
            ],
        );
        Ok(())
    }

    // --- drag lifecycle ----------------------------------------------------

    /// Capture the dragged entity and classify it once, by registry
    /// lookup rather than payload shape.
    pub fn begin_drag(&mut self, entity: &str) -> Result<()> {
        let kind = self.catalog.kind_of(entity)?;
        self.drag.begin(entity, kind);
        self.log(
            LogLevel::Debug,
            "drag_started",
            [
                json_kv("entity", json!(entity)),
                json_kv("kind", json!(kind.to_string())),
            ],
        );
        Ok(())
    }

    /// Finish the drag over `target`. Class mismatches and missing
    /// targets resolve to a cancelled drop, not an error; errors are
    /// reserved for transitions that passed resolution but violate a
    /// precondition (out-of-range slot, unplaced receiving aisle).
    pub fn drop_at(&mut self, target: DropTarget) -> Result<DropOutcome> {
        match self.drag.drop_on(target) {
            DropAction::PlaceAt { entity, slot } => {
                self.place(&entity, slot)?;
                Ok(DropOutcome::Placed)
            }
            DropAction::AddToAisle { product, aisle } => {
                self.add_product_to_aisle(&product, &aisle)?;
                Ok(DropOutcome::AddedToAisle)
            }
            DropAction::Cancel => {
                self.log(LogLevel::Debug, "drag_cancelled", std::iter::empty());
                Ok(DropOutcome::Cancelled)
            }
        }
    }

    pub fn cancel_drag(&mut self) {
        if self.drag.is_dragging() {
            self.drag.cancel();
            self.log(LogLevel::Debug, "drag_cancelled", std::iter::empty());
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // --- views -------------------------------------------------------------

    pub fn slot_of(&self, entity: &str) -> Option<Slot> {
        self.placement.slot_of(entity)
    }

    /// Aisles registered but not on the grid, for the "available" tray.
    pub fn unplaced_aisles(&self) -> Vec<&Aisle> {
        self.catalog
            .aisles()
            .filter(|aisle| !self.placement.is_placed(&aisle.id))
            .collect()
    }

    /// Features registered but not on the border.
    pub fn unplaced_features(&self) -> Vec<&StoreFeature> {
        self.catalog
            .features()
            .filter(|feature| !self.placement.is_placed(&feature.id))
            .collect()
    }

    /// Products not shelved in any aisle.
    pub fn available_products(&self) -> Vec<&Product> {
        self.catalog
            .products()
            .filter(|product| !self.containment.is_contained(&product.id))
            .collect()
    }

    /// Emit a metrics snapshot to the configured logger.
    pub fn emit_metrics(&self) {
        let uptime = self.uptime();
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let event = guard
                    .snapshot(uptime)
                    .to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    // --- precondition checks ----------------------------------------------

    fn check_placeable(&self, entity: &str, slot: Slot) -> Result<()> {
        let kind = self.catalog.kind_of(entity)?;
        let class_ok = match kind {
            EntityKind::Aisle => slot.is_interior(),
            EntityKind::Feature => slot.is_border(),
            EntityKind::Product => false,
        };
        if !class_ok {
            return Err(PlacementError::InvalidSlotClass {
                entity: entity.to_string(),
                kind,
                slot,
            });
        }
        if !self.topology.contains(slot) {
            return Err(PlacementError::TopologyOutOfRange { slot });
        }
        Ok(())
    }

    fn check_swappable(&self, a: &str, b: &str) -> Result<(Slot, Slot)> {
        let kind_a = self.catalog.kind_of(a)?;
        let kind_b = self.catalog.kind_of(b)?;
        let slot_a = self
            .placement
            .slot_of(a)
            .ok_or_else(|| PlacementError::NotPlaced(a.to_string()))?;
        let slot_b = self
            .placement
            .slot_of(b)
            .ok_or_else(|| PlacementError::NotPlaced(b.to_string()))?;
        if kind_a != kind_b {
            // Swapping across classes would land `a` on `b`'s slot.
            return Err(PlacementError::InvalidSlotClass {
                entity: a.to_string(),
                kind: kind_a,
                slot: slot_b,
            });
        }
        Ok((slot_a, slot_b))
    }

    fn check_containable(&self, product: &str, aisle: &str) -> Result<()> {
        if self.catalog.product(product).is_none() {
            return Err(PlacementError::UnknownEntity(product.to_string()));
        }
        if self.catalog.aisle(aisle).is_none() {
            return Err(PlacementError::UnknownEntity(aisle.to_string()));
        }
        // Only an aisle on the grid has a spatial meaning to shelve into.
        if !self.placement.is_placed(aisle) {
            return Err(PlacementError::NotPlaced(aisle.to_string()));
        }
        Ok(())
    }

    // --- reporting ---------------------------------------------------------

    fn reject(&mut self, err: PlacementError) -> PlacementError {
        self.with_metrics(|m| m.record_rejection());
        self.log(
            LogLevel::Warn,
            "transition_rejected",
            [json_kv("reason", json!(err.to_string()))],
        );
        err
    }

    fn with_metrics(&self, f: impl FnOnce(&mut EngineMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                f(&mut guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "storeplan::engine", message, fields);
            let _ = logger.log_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeatureType;
    use crate::logging::MemorySink;
    use crate::topology::Side;

    fn aisle(id: &str) -> Aisle {
        Aisle {
            id: id.into(),
            name: id.into(),
            color: "#cccccc".into(),
        }
    }

    fn feature(id: &str) -> StoreFeature {
        StoreFeature {
            id: id.into(),
            name: id.into(),
            feature_type: FeatureType::Checkout,
            emoji: "🛒".into(),
            color: "#eeeeee".into(),
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            price: 2.5,
        }
    }

    fn engine() -> LayoutEngine {
        let mut engine = LayoutEngine::new(6);
        engine.add_aisle(aisle("a"));
        engine.add_aisle(aisle("b"));
        engine.add_feature(feature("f"));
        engine.add_product(product("p1"));
        engine.add_product(product("p2"));
        engine
    }

    #[test]
    fn placing_on_occupied_slot_unplaces_prior_occupant() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(2)).unwrap();
        engine.place("b", Slot::Interior(2)).unwrap();
        assert_eq!(engine.slot_of("b"), Some(Slot::Interior(2)));
        assert_eq!(engine.slot_of("a"), None);
        assert_eq!(engine.unplaced_aisles().len(), 1);
    }

    #[test]
    fn placing_from_another_slot_swaps_asymmetrically() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.place("b", Slot::Interior(1)).unwrap();
        // `a` was placed, so the occupant of slot 1 takes slot 0.
        engine.place("a", Slot::Interior(1)).unwrap();
        assert_eq!(engine.slot_of("a"), Some(Slot::Interior(1)));
        assert_eq!(engine.slot_of("b"), Some(Slot::Interior(0)));
    }

    #[test]
    fn explicit_swap_exchanges_slots() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.place("b", Slot::Interior(1)).unwrap();
        engine.swap("a", "b").unwrap();
        assert_eq!(engine.slot_of("a"), Some(Slot::Interior(1)));
        assert_eq!(engine.slot_of("b"), Some(Slot::Interior(0)));
    }

    #[test]
    fn swap_requires_both_placed() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        let err = engine.swap("a", "b").unwrap_err();
        assert!(matches!(err, PlacementError::NotPlaced(id) if id == "b"));
        assert_eq!(engine.slot_of("a"), Some(Slot::Interior(0)));
    }

    #[test]
    fn class_mismatch_is_rejected_without_state_change() {
        let mut engine = engine();
        engine.place("f", Slot::border(Side::Top, 0)).unwrap();
        let err = engine.place("f", Slot::Interior(0)).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidSlotClass { .. }));
        assert_eq!(engine.slot_of("f"), Some(Slot::border(Side::Top, 0)));
    }

    #[test]
    fn products_never_occupy_slots() {
        let mut engine = engine();
        let err = engine.place("p1", Slot::Interior(0)).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidSlotClass { .. }));
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut engine = engine();
        let err = engine.place("a", Slot::Interior(6)).unwrap_err();
        assert!(matches!(err, PlacementError::TopologyOutOfRange { .. }));
        let err = engine.place("f", Slot::border(Side::Left, 2)).unwrap_err();
        assert!(matches!(err, PlacementError::TopologyOutOfRange { .. }));
    }

    #[test]
    fn unplace_is_idempotent() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.unplace("a").unwrap();
        engine.unplace("a").unwrap();
        assert_eq!(engine.slot_of("a"), None);
        assert!(matches!(
            engine.unplace("ghost").unwrap_err(),
            PlacementError::UnknownEntity(_)
        ));
    }

    #[test]
    fn removing_an_aisle_releases_its_products() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.add_product_to_aisle("p1", "a").unwrap();
        engine.add_product_to_aisle("p2", "a").unwrap();
        assert!(engine.available_products().is_empty());

        engine.remove_entity("a").unwrap();
        assert!(!engine.catalog().contains("a"));
        assert_eq!(engine.available_products().len(), 2);
        assert!(engine.placement().occupant(Slot::Interior(0)).is_none());
    }

    #[test]
    fn removing_a_product_detaches_it_from_its_aisle() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.add_product_to_aisle("p1", "a").unwrap();
        engine.remove_entity("p1").unwrap();
        assert!(engine.containment().products_in("a").is_empty());
    }

    #[test]
    fn shelving_requires_a_placed_aisle() {
        let mut engine = engine();
        let err = engine.add_product_to_aisle("p1", "a").unwrap_err();
        assert!(matches!(err, PlacementError::NotPlaced(id) if id == "a"));
    }

    #[test]
    fn shelving_moves_between_aisles() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.place("b", Slot::Interior(1)).unwrap();
        engine.add_product_to_aisle("p1", "a").unwrap();
        engine.add_product_to_aisle("p1", "b").unwrap();
        assert!(engine.containment().products_in("a").is_empty());
        assert_eq!(engine.containment().products_in("b"), ["p1"]);
    }

    #[test]
    fn growth_preserves_interior_placements() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(5)).unwrap();
        engine.place("f", Slot::border(Side::Top, 2)).unwrap();
        let orphaned = engine.grow(4);
        assert!(orphaned.is_empty());
        assert_eq!(engine.topology().spots(), 10);
        assert_eq!(engine.slot_of("a"), Some(Slot::Interior(5)));
        assert_eq!(engine.slot_of("f"), Some(Slot::border(Side::Top, 2)));
    }

    #[test]
    fn drag_lifecycle_places_aisles() {
        let mut engine = engine();
        engine.begin_drag("a").unwrap();
        let outcome = engine.drop_at(DropTarget::Slot(Slot::Interior(3))).unwrap();
        assert_eq!(outcome, DropOutcome::Placed);
        assert_eq!(engine.slot_of("a"), Some(Slot::Interior(3)));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn drag_onto_wrong_class_is_a_cancel_not_an_error() {
        let mut engine = engine();
        engine.begin_drag("a").unwrap();
        let outcome = engine
            .drop_at(DropTarget::Slot(Slot::border(Side::Top, 0)))
            .unwrap();
        assert_eq!(outcome, DropOutcome::Cancelled);
        assert_eq!(engine.slot_of("a"), None);
    }

    #[test]
    fn drag_of_unknown_entity_fails_up_front() {
        let mut engine = engine();
        assert!(matches!(
            engine.begin_drag("ghost").unwrap_err(),
            PlacementError::UnknownEntity(_)
        ));
    }

    #[test]
    fn product_drag_onto_placed_aisle_shelves_it() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.begin_drag("p1").unwrap();
        let outcome = engine.drop_at(DropTarget::Aisle("a".into())).unwrap();
        assert_eq!(outcome, DropOutcome::AddedToAisle);
        assert_eq!(engine.containment().aisle_of("p1").unwrap(), "a");
    }

    #[test]
    fn rejected_transitions_are_logged_and_counted() {
        let sink = MemorySink::new();
        let mut engine = engine();
        {
            let config = engine.config_mut();
            config.logger = Some(Logger::new(sink.clone()));
            config.enable_metrics();
        }
        let _ = engine.place("p1", Slot::Interior(0));
        assert!(sink.messages().contains(&"transition_rejected".to_string()));

        let handle = engine.config_mut().metrics_handle().unwrap();
        let snapshot = handle.lock().unwrap().snapshot(Duration::ZERO);
        assert_eq!(snapshot.rejections, 1);
    }

    #[test]
    fn applied_transitions_emit_events() {
        let sink = MemorySink::new();
        let mut engine = engine();
        engine.config_mut().logger = Some(Logger::new(sink.clone()));
        engine.place("a", Slot::Interior(0)).unwrap();
        engine.place("b", Slot::Interior(1)).unwrap();
        engine.swap("a", "b").unwrap();
        engine.unplace("b").unwrap();
        let messages = sink.messages();
        assert_eq!(messages, ["placed", "placed", "swapped", "unplaced"]);
    }

    #[test]
    fn placed_and_unplaced_views_partition_the_catalog() {
        let mut engine = engine();
        engine.place("a", Slot::Interior(0)).unwrap();
        let placed: Vec<_> = engine.placement().iter().map(|(e, _)| e.clone()).collect();
        let unplaced: Vec<_> = engine
            .unplaced_aisles()
            .iter()
            .map(|aisle| aisle.id.clone())
            .collect();
        assert_eq!(placed.len() + unplaced.len(), engine.catalog().aisles().count());
        assert!(!unplaced.contains(&"a".to_string()));
    }
}
