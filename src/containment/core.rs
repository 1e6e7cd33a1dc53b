//! Containment map - which products sit inside which aisle.
//!
//! Independent of the placement map: a contained product occupies its
//! aisle, never a grid or border slot of its own. The relation is
//! one-to-many with move semantics; adding a product that already lives
//! in another aisle relocates it instead of duplicating it.

use std::collections::HashMap;

use crate::catalog::EntityId;
use crate::error::{PlacementError, Result};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Containment {
    // Insertion order inside an aisle is meaningful to the shelf view,
    // so the per-aisle lists stay ordered.
    by_aisle: HashMap<EntityId, Vec<EntityId>>,
    aisle_of: HashMap<EntityId, EntityId>,
}

impl Containment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `product` into `aisle`, detaching it from any prior aisle.
    /// Returns the aisle it was moved out of, if any.
    pub fn add(&mut self, product: &str, aisle: &str) -> Option<EntityId> {
        let prior = self.detach(product);
        self.by_aisle
            .entry(aisle.to_string())
            .or_default()
            .push(product.to_string());
        self.aisle_of.insert(product.to_string(), aisle.to_string());
        prior
    }

    /// Take `product` out of `aisle` and back to the catalog.
    pub fn remove(&mut self, product: &str, aisle: &str) -> Result<()> {
        if self.aisle_of.get(product).map(String::as_str) != Some(aisle) {
            return Err(PlacementError::NotContained {
                product: product.to_string(),
                aisle: aisle.to_string(),
            });
        }
        self.detach(product);
        Ok(())
    }

    /// Empty an aisle, returning its products in shelf order.
    pub fn drain_aisle(&mut self, aisle: &str) -> Vec<EntityId> {
        let products = self.by_aisle.remove(aisle).unwrap_or_default();
        for product in &products {
            self.aisle_of.remove(product);
        }
        products
    }

    fn detach(&mut self, product: &str) -> Option<EntityId> {
        let aisle = self.aisle_of.remove(product)?;
        if let Some(list) = self.by_aisle.get_mut(&aisle) {
            list.retain(|p| p != product);
            if list.is_empty() {
                self.by_aisle.remove(&aisle);
            }
        }
        Some(aisle)
    }

    /// Detach a product from wherever it is. Used when the product
    /// itself is deleted.
    pub fn remove_product(&mut self, product: &str) -> Option<EntityId> {
        self.detach(product)
    }

    pub fn aisle_of(&self, product: &str) -> Option<&EntityId> {
        self.aisle_of.get(product)
    }

    pub fn products_in(&self, aisle: &str) -> &[EntityId] {
        self.by_aisle.get(aisle).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_contained(&self, product: &str) -> bool {
        self.aisle_of.contains_key(product)
    }

    pub fn aisles(&self) -> impl Iterator<Item = (&EntityId, &[EntityId])> {
        self.by_aisle
            .iter()
            .map(|(aisle, products)| (aisle, products.as_slice()))
    }
}
