//! Spatial model and placement checks for equipment in a room

pub mod geometry;
pub mod placement;
pub mod validation;

pub use geometry::{BoundingBox, Wall};
pub use placement::{CatalogItem, CatalogLookup, MountType, PlacedItem, Position, Room, RoomLayout};
pub use validation::{LayoutReport, PlacementError, PlacementValidationResult, PlacementValidator};
