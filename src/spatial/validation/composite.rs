//! Composite validator that runs every placement check

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::{
    BoundsValidator, CollisionValidator, MountValidator, PlacementError,
    PlacementValidationResult,
};
use crate::core::config::EngineConfig;
use crate::spatial::geometry::{self, Wall};
use crate::spatial::placement::{CatalogItem, CatalogLookup, PlacedItem, Position, Room};

/// Result of validating every placement in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub is_valid: bool,
    /// Keyed by placement id
    pub placements: BTreeMap<String, PlacementValidationResult>,
}

impl LayoutReport {
    pub fn invalid_ids(&self) -> impl Iterator<Item = &str> {
        self.placements
            .iter()
            .filter(|(_, result)| !result.is_valid)
            .map(|(id, _)| id.as_str())
    }
}

/// Stateless placement checker configured with grid and zoning thresholds
#[derive(Debug, Clone, Default)]
pub struct PlacementValidator {
    config: EngineConfig,
}

impl PlacementValidator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_within_bounds(
        &self,
        item: &PlacedItem,
        room: &Room,
        footprint: &CatalogItem,
    ) -> bool {
        BoundsValidator::is_within_bounds(item, room, footprint)
    }

    pub fn is_valid_mount_position(&self, item: &PlacedItem, room: &Room) -> bool {
        MountValidator::is_valid_mount_position(
            item,
            room,
            self.config.wall_threshold,
            self.config.corner_threshold,
        )
    }

    pub fn detect_collisions<L: CatalogLookup + ?Sized>(
        &self,
        candidate: &PlacedItem,
        existing: &[PlacedItem],
        lookup: &L,
    ) -> Vec<String> {
        CollisionValidator::detect_collisions(candidate, existing, lookup)
    }

    /// Validate one placement against the room and the other placements
    ///
    /// A missing catalog entry is the only error reported in that case;
    /// otherwise bounds, mount and collision checks all run.
    pub fn validate_placement<L: CatalogLookup + ?Sized>(
        &self,
        item: &PlacedItem,
        room: &Room,
        existing: &[PlacedItem],
        lookup: &L,
    ) -> PlacementValidationResult {
        let mut result = PlacementValidationResult::new();

        let Some(footprint) = lookup.footprint(&item.item_ref) else {
            result.add_error(PlacementError::MissingCatalogEntry {
                item_ref: item.item_ref.clone(),
            });
            return result;
        };

        if !self.is_within_bounds(item, room, footprint) {
            result.add_error(PlacementError::OutOfBounds {
                item_id: item.id.clone(),
            });
        }

        if !self.is_valid_mount_position(item, room) {
            result.add_error(PlacementError::InvalidMountPosition {
                item_id: item.id.clone(),
                mount_type: item.mount_type,
            });
        }

        let colliding = self.detect_collisions(item, existing, lookup);
        if !colliding.is_empty() {
            result.add_error(PlacementError::Collision {
                item_id: item.id.clone(),
                colliding,
            });
        }

        if !result.is_valid {
            tracing::debug!(item_id = %item.id, errors = result.errors.len(), "Placement rejected");
        }

        result
    }

    /// Validate every placement against all the others
    ///
    /// Placements sharing an id are reported under that id together, with
    /// a duplicate-id error added.
    pub fn validate_layout<L: CatalogLookup + ?Sized>(
        &self,
        room: &Room,
        placements: &[PlacedItem],
        lookup: &L,
    ) -> LayoutReport {
        let mut results: BTreeMap<String, PlacementValidationResult> = BTreeMap::new();
        let mut duplicates = BTreeSet::new();

        for item in placements {
            let result = self.validate_placement(item, room, placements, lookup);
            match results.entry(item.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(result);
                }
                Entry::Occupied(mut slot) => {
                    tracing::warn!(item_id = %item.id, "Duplicate placement id in layout");
                    let merged = slot.get_mut();
                    if duplicates.insert(item.id.as_str()) {
                        merged.add_error(PlacementError::DuplicateId {
                            item_id: item.id.clone(),
                        });
                    }
                    merged.merge(result);
                }
            }
        }

        LayoutReport {
            is_valid: results.values().all(|r| r.is_valid),
            placements: results,
        }
    }

    // === EDITOR HELPERS ===

    pub fn snap_to_grid(&self, value: f64) -> f64 {
        geometry::snap_to_grid(value, self.config.grid_size)
    }

    pub fn rotate_by(&self, current: f64, delta: f64) -> f64 {
        geometry::rotate_by(current, delta, self.config.rotation_step)
    }

    pub fn align_to_wall(&self, position: Position, room: &Room, wall: Option<Wall>) -> Position {
        geometry::align_to_wall(position, room, wall)
    }

    pub fn calculate_placement_position(
        &self,
        drop: Position,
        footprint: Option<&CatalogItem>,
        center_on_drop: bool,
    ) -> Position {
        geometry::calculate_placement_position(
            drop,
            footprint,
            center_on_drop,
            self.config.grid_size,
        )
    }
}
