//! Entity catalog - the canonical registry of everything that can be
//! dragged onto the floor plan.
//!
//! The catalog is the source of truth for "what exists". Where an
//! entity currently sits is tracked elsewhere (placement and
//! containment maps); deleting or creating entities goes through here.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};

pub type EntityId = String;

/// Discriminant carried alongside every dragged payload so drop
/// handlers never have to sniff the payload's field shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Aisle,
    Feature,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Aisle => "aisle",
            EntityKind::Feature => "store feature",
            EntityKind::Product => "product",
        };
        f.write_str(label)
    }
}

/// Fixed vocabulary of border features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Entrance,
    Exit,
    Checkout,
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeatureType::Entrance => "entrance",
            FeatureType::Exit => "exit",
            FeatureType::Checkout => "checkout",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aisle {
    pub id: EntityId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreFeature {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub emoji: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    /// Display only; never consulted by placement logic.
    pub price: f64,
}

/// Registry of all placeable entities, keyed by id within each class.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    aisles: HashMap<EntityId, Aisle>,
    features: HashMap<EntityId, StoreFeature>,
    products: HashMap<EntityId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_aisle(&mut self, aisle: Aisle) {
        self.aisles.insert(aisle.id.clone(), aisle);
    }

    pub fn insert_feature(&mut self, feature: StoreFeature) {
        self.features.insert(feature.id.clone(), feature);
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn aisle(&self, id: &str) -> Option<&Aisle> {
        self.aisles.get(id)
    }

    pub fn feature(&self, id: &str) -> Option<&StoreFeature> {
        self.features.get(id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Classify a registered id, or report it unknown.
    pub fn kind_of(&self, id: &str) -> Result<EntityKind> {
        if self.aisles.contains_key(id) {
            Ok(EntityKind::Aisle)
        } else if self.features.contains_key(id) {
            Ok(EntityKind::Feature)
        } else if self.products.contains_key(id) {
            Ok(EntityKind::Product)
        } else {
            Err(PlacementError::UnknownEntity(id.to_string()))
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kind_of(id).is_ok()
    }

    /// Rename any registered entity.
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if let Some(aisle) = self.aisles.get_mut(id) {
            aisle.name = name;
        } else if let Some(feature) = self.features.get_mut(id) {
            feature.name = name;
        } else if let Some(product) = self.products.get_mut(id) {
            product.name = name;
        } else {
            return Err(PlacementError::UnknownEntity(id.to_string()));
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &str) -> Result<EntityKind> {
        let kind = self.kind_of(id)?;
        match kind {
            EntityKind::Aisle => {
                self.aisles.remove(id);
            }
            EntityKind::Feature => {
                self.features.remove(id);
            }
            EntityKind::Product => {
                self.products.remove(id);
            }
        }
        Ok(kind)
    }

    pub fn aisles(&self) -> impl Iterator<Item = &Aisle> {
        self.aisles.values()
    }

    pub fn features(&self) -> impl Iterator<Item = &StoreFeature> {
        self.features.values()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
