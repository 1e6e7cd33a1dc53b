//! Placement map - the bidirectional association between entities and
//! slots.
//!
//! The map is a partial injective function: a slot holds at most one
//! entity and an entity occupies at most one slot. `assign` is the only
//! way to add an association and it upholds both directions in a single
//! step, so no caller can observe an entity in two slots or a vacated
//! slot that still claims its old occupant.

use std::collections::HashMap;

use crate::catalog::EntityId;
use crate::topology::Slot;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlacementMap {
    by_slot: HashMap<Slot, EntityId>,
    by_entity: HashMap<EntityId, Slot>,
}

impl PlacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_of(&self, entity: &str) -> Option<Slot> {
        self.by_entity.get(entity).copied()
    }

    pub fn occupant(&self, slot: Slot) -> Option<&EntityId> {
        self.by_slot.get(&slot)
    }

    pub fn is_placed(&self, entity: &str) -> bool {
        self.by_entity.contains_key(entity)
    }

    /// Put `entity` at `slot`, vacating the entity's previous slot.
    /// Returns the displaced prior occupant of `slot`, if any; the
    /// displaced entity is left unplaced and the caller decides where
    /// it goes next.
    pub fn assign(&mut self, entity: &str, slot: Slot) -> Option<EntityId> {
        let displaced = self.remove_slot(slot).filter(|prior| prior != entity);
        self.remove_entity(entity);
        self.by_slot.insert(slot, entity.to_string());
        self.by_entity.insert(entity.to_string(), slot);
        displaced
    }

    /// Drop the entity's association. Idempotent; returns the slot it
    /// vacated, if it was placed.
    pub fn remove_entity(&mut self, entity: &str) -> Option<Slot> {
        let slot = self.by_entity.remove(entity)?;
        self.by_slot.remove(&slot);
        Some(slot)
    }

    fn remove_slot(&mut self, slot: Slot) -> Option<EntityId> {
        let entity = self.by_slot.remove(&slot)?;
        self.by_entity.remove(&entity);
        Some(entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, Slot)> {
        self.by_entity.iter().map(|(entity, slot)| (entity, *slot))
    }

    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Side, Slot};

    #[test]
    fn assign_links_both_directions() {
        let mut map = PlacementMap::new();
        assert!(map.assign("a", Slot::Interior(2)).is_none());
        assert_eq!(map.slot_of("a"), Some(Slot::Interior(2)));
        assert_eq!(map.occupant(Slot::Interior(2)).unwrap(), "a");
    }

    #[test]
    fn assign_moves_rather_than_duplicates() {
        let mut map = PlacementMap::new();
        map.assign("a", Slot::Interior(0));
        map.assign("a", Slot::Interior(3));
        assert_eq!(map.slot_of("a"), Some(Slot::Interior(3)));
        assert!(map.occupant(Slot::Interior(0)).is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn assign_reports_displaced_occupant() {
        let mut map = PlacementMap::new();
        map.assign("a", Slot::Interior(1));
        let displaced = map.assign("b", Slot::Interior(1));
        assert_eq!(displaced.as_deref(), Some("a"));
        assert!(!map.is_placed("a"));
        assert_eq!(map.occupant(Slot::Interior(1)).unwrap(), "b");
    }

    #[test]
    fn reassigning_same_slot_is_not_a_displacement() {
        let mut map = PlacementMap::new();
        map.assign("a", Slot::border(Side::Top, 0));
        let displaced = map.assign("a", Slot::border(Side::Top, 0));
        assert!(displaced.is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_entity_is_idempotent() {
        let mut map = PlacementMap::new();
        map.assign("a", Slot::Interior(0));
        assert_eq!(map.remove_entity("a"), Some(Slot::Interior(0)));
        assert_eq!(map.remove_entity("a"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn injectivity_holds_under_churn() {
        let mut map = PlacementMap::new();
        for round in 0..4 {
            for n in 0..8usize {
                map.assign(&format!("e{}", n % 5), Slot::Interior((n + round) % 6));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for (_, slot) in map.iter() {
            assert!(seen.insert(slot), "slot {slot} occupied twice");
        }
    }
}
