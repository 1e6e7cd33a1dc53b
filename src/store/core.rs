//! Canonical store document - the engine's only wire format.
//!
//! The backend exchanges one JSON document per store: aisles with an
//! integer `position` or null, features with a `"{side}-{index}"`
//! position or null, the aisle-to-product adjacency, the product
//! catalog and the interior spot count. `hydrate` rebuilds an engine
//! from such a document and `serialize` projects an engine back to it;
//! the two are inverses for any valid document.
//!
//! `SaveTracker` hashes the serialized document so the editor can tell
//! whether the in-memory layout has drifted from the last save.

use std::collections::BTreeMap;

use blake3::Hash;
use serde::{Deserialize, Serialize};

use crate::catalog::{Aisle, Catalog, EntityId, FeatureType, Product, StoreFeature};
use crate::engine::LayoutEngine;
use crate::error::{PlacementError, Result};
use crate::topology::{BorderRef, Slot, Topology};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AisleRecord {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    pub position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub emoji: String,
    pub color: String,
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: EntityId,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    pub grid_spots: usize,
    pub aisles: Vec<AisleRecord>,
    pub store_features: Vec<FeatureRecord>,
    pub products: Vec<ProductRecord>,
    // BTreeMap keeps the serialized adjacency stable across runs.
    pub aisles_products: BTreeMap<EntityId, Vec<EntityId>>,
}

/// Rebuild an engine from a canonical document.
pub fn hydrate(record: &StoreRecord) -> Result<LayoutEngine> {
    let topology = Topology::new(record.grid_spots);
    let mut catalog = Catalog::new();

    for aisle in &record.aisles {
        catalog.insert_aisle(Aisle {
            id: aisle.id.clone(),
            name: aisle.name.clone(),
            color: aisle.color.clone(),
        });
    }
    for feature in &record.store_features {
        catalog.insert_feature(StoreFeature {
            id: feature.id.clone(),
            name: feature.name.clone(),
            feature_type: feature.feature_type,
            emoji: feature.emoji.clone(),
            color: feature.color.clone(),
        });
    }
    for product in &record.products {
        catalog.insert_product(Product {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
        });
    }

    let mut engine = LayoutEngine::with_catalog(catalog, topology);

    for aisle in &record.aisles {
        if let Some(position) = aisle.position {
            let slot = Slot::Interior(position);
            occupied_check(&engine, slot)?;
            engine.place(&aisle.id, slot)?;
        }
    }
    for feature in &record.store_features {
        if let Some(position) = &feature.position {
            let border: BorderRef = position
                .parse()
                .map_err(PlacementError::Hydrate)?;
            let slot = Slot::Border(border);
            occupied_check(&engine, slot)?;
            engine.place(&feature.id, slot)?;
        }
    }

    for (aisle, products) in &record.aisles_products {
        if engine.catalog().aisle(aisle).is_none() {
            return Err(PlacementError::Hydrate(format!(
                "adjacency references unknown aisle `{aisle}`"
            )));
        }
        for product in products {
            if engine.catalog().product(product).is_none() {
                return Err(PlacementError::Hydrate(format!(
                    "aisle `{aisle}` references unknown product `{product}`"
                )));
            }
            if let Some(prior) = engine.containment().aisle_of(product) {
                return Err(PlacementError::Hydrate(format!(
                    "product `{product}` contained by both `{prior}` and `{aisle}`"
                )));
            }
            engine.restore_containment(product, aisle);
        }
    }

    Ok(engine)
}

fn occupied_check(engine: &LayoutEngine, slot: Slot) -> Result<()> {
    // A canonical document must not place two entities on one slot;
    // `place` would silently resolve it as a swap, so reject up front.
    if let Some(occupant) = engine.placement().occupant(slot) {
        return Err(PlacementError::Hydrate(format!(
            "{slot} assigned twice (already held by `{occupant}`)"
        )));
    }
    Ok(())
}

/// Project an engine back to the canonical document.
pub fn serialize(engine: &LayoutEngine) -> StoreRecord {
    let mut aisles: Vec<AisleRecord> = engine
        .catalog()
        .aisles()
        .map(|aisle| AisleRecord {
            id: aisle.id.clone(),
            name: aisle.name.clone(),
            color: aisle.color.clone(),
            position: match engine.slot_of(&aisle.id) {
                Some(Slot::Interior(position)) => Some(position),
                _ => None,
            },
        })
        .collect();
    aisles.sort_by(|a, b| a.id.cmp(&b.id));

    let mut store_features: Vec<FeatureRecord> = engine
        .catalog()
        .features()
        .map(|feature| FeatureRecord {
            id: feature.id.clone(),
            name: feature.name.clone(),
            feature_type: feature.feature_type,
            emoji: feature.emoji.clone(),
            color: feature.color.clone(),
            position: match engine.slot_of(&feature.id) {
                Some(Slot::Border(border)) => Some(border.to_string()),
                _ => None,
            },
        })
        .collect();
    store_features.sort_by(|a, b| a.id.cmp(&b.id));

    let mut products: Vec<ProductRecord> = engine
        .catalog()
        .products()
        .map(|product| ProductRecord {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
        })
        .collect();
    products.sort_by(|a, b| a.id.cmp(&b.id));

    let aisles_products = engine
        .containment()
        .aisles()
        .map(|(aisle, products)| (aisle.clone(), products.to_vec()))
        .collect();

    StoreRecord {
        grid_spots: engine.topology().spots(),
        aisles,
        store_features,
        products,
        aisles_products,
    }
}

/// Content hash of the last saved document, for dirty detection.
#[derive(Debug, Default, Clone)]
pub struct SaveTracker {
    saved: Option<Hash>,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_of(record: &StoreRecord) -> Hash {
        // Serialization is deterministic (sorted vectors, BTreeMap), so
        // equal states hash equally.
        let json = serde_json::to_string(record).unwrap_or_default();
        blake3::hash(json.as_bytes())
    }

    /// Record the document that was just persisted.
    pub fn mark_saved(&mut self, record: &StoreRecord) {
        self.saved = Some(Self::hash_of(record));
    }

    /// Whether `record` differs from the last saved document. A
    /// never-saved layout is always dirty.
    pub fn is_dirty(&self, record: &StoreRecord) -> bool {
        self.saved.map(|h| h != Self::hash_of(record)).unwrap_or(true)
    }
}
