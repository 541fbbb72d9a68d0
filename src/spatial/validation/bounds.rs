//! Room bounds validation

use crate::spatial::geometry::bounding_box;
use crate::spatial::placement::{CatalogItem, PlacedItem, Room};

pub struct BoundsValidator;

impl BoundsValidator {
    /// The rotation-aware footprint must lie inside the room
    pub fn is_within_bounds(item: &PlacedItem, room: &Room, footprint: &CatalogItem) -> bool {
        bounding_box(item, footprint).within(room.width, room.length)
    }
}
