//! Placement validation for equipment dropped into a room

mod bounds;
mod collision;
mod composite;
mod mount;

pub use bounds::BoundsValidator;
pub use collision::CollisionValidator;
pub use composite::{LayoutReport, PlacementValidator};
pub use mount::MountValidator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::placement::MountType;

/// Placement failure types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("Equipment '{item_ref}' not found in catalog")]
    MissingCatalogEntry { item_ref: String },

    #[error("Item '{item_id}' extends outside the room boundaries")]
    OutOfBounds { item_id: String },

    #[error("Item '{item_id}' {}", mount_requirement(.mount_type))]
    InvalidMountPosition { item_id: String, mount_type: MountType },

    #[error("Item '{item_id}' collides with: {}", join_ids(.colliding))]
    Collision { item_id: String, colliding: Vec<String> },

    #[error("Item id '{item_id}' is used by more than one placement")]
    DuplicateId { item_id: String },
}

fn mount_requirement(mount_type: &MountType) -> &'static str {
    match mount_type {
        MountType::Wall => "is wall-mounted and must be placed against a wall",
        MountType::Rack => "is rack-mounted and must be placed in a corner",
        _ => "is not in a valid mount position",
    }
}

fn join_ids(ids: &[String]) -> String {
    ids.join(", ")
}

/// Outcome of one placement check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl PlacementValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PlacementError) {
        self.is_valid = false;
        self.errors.push(error.to_string());
    }

    /// Fold another result for the same id into this one
    pub fn merge(&mut self, other: PlacementValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
    }
}

impl Default for PlacementValidationResult {
    fn default() -> Self {
        Self::new()
    }
}
