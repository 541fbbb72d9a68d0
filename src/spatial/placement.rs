//! Placement model: rooms, placed equipment and catalog footprints
//!
//! These structs match the JSON the room editor sends with each check.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::hash::BuildHasher;
use std::path::Path;

use crate::core::error::{DesignError, Result};

/// How a placed item attaches to the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    Floor,
    Ceiling,
    Wall,
    Rack,
    /// Unrecognised mount types are accepted anywhere
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MountType::Floor => "floor",
            MountType::Ceiling => "ceiling",
            MountType::Wall => "wall",
            MountType::Rack => "rack",
            MountType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// 2D position in room units; for placed items this is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One equipment instance in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: String,
    /// Catalog key of the equipment
    pub item_ref: String,
    pub x: f64,
    pub y: f64,
    /// Degrees, expected in [0, 360)
    #[serde(default)]
    pub rotation: f64,
    pub mount_type: MountType,
}

impl PlacedItem {
    pub fn new(
        id: impl Into<String>,
        item_ref: impl Into<String>,
        x: f64,
        y: f64,
        mount_type: MountType,
    ) -> Self {
        Self {
            id: id.into(),
            item_ref: item_ref.into(),
            x,
            y,
            rotation: 0.0,
            mount_type,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Bounded rectangular space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub width: f64,
    pub length: f64,
    /// Not used by the 2D checks
    #[serde(default)]
    pub ceiling_height: f64,
}

impl Room {
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            width,
            length,
            ceiling_height: 0.0,
        }
    }
}

/// Physical footprint of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    pub width: f64,
    pub depth: f64,
    /// Not used by the 2D checks
    #[serde(default)]
    pub height: f64,
}

impl CatalogItem {
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            width,
            depth,
            height: 0.0,
        }
    }
}

/// Read access to catalog footprints keyed by item reference
pub trait CatalogLookup {
    fn footprint(&self, item_ref: &str) -> Option<&CatalogItem>;
}

impl<S: BuildHasher> CatalogLookup for HashMap<String, CatalogItem, S> {
    fn footprint(&self, item_ref: &str) -> Option<&CatalogItem> {
        self.get(item_ref)
    }
}

impl CatalogLookup for AHashMap<String, CatalogItem> {
    fn footprint(&self, item_ref: &str) -> Option<&CatalogItem> {
        self.get(item_ref)
    }
}

impl CatalogLookup for BTreeMap<String, CatalogItem> {
    fn footprint(&self, item_ref: &str) -> Option<&CatalogItem> {
        self.get(item_ref)
    }
}

impl<T: CatalogLookup + ?Sized> CatalogLookup for &T {
    fn footprint(&self, item_ref: &str) -> Option<&CatalogItem> {
        (**self).footprint(item_ref)
    }
}

/// Snapshot of a room as exported by the room editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLayout {
    pub room: Room,
    #[serde(default)]
    pub placements: Vec<PlacedItem>,
    /// Footprints keyed by item reference
    #[serde(default)]
    pub catalog: BTreeMap<String, CatalogItem>,
}

impl RoomLayout {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// First placement with the given id
    pub fn placement(&self, id: &str) -> Result<&PlacedItem> {
        self.placements
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DesignError::NotFound(format!("placement '{}'", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placed_item_deserialize() {
        let json = r#"{
            "id": "p1",
            "itemRef": "rack-42u",
            "x": 1.0,
            "y": 2.5,
            "rotation": 90,
            "mountType": "rack"
        }"#;
        let item: PlacedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_ref, "rack-42u");
        assert_eq!(item.rotation, 90.0);
        assert_eq!(item.mount_type, MountType::Rack);
    }

    #[test]
    fn test_unknown_mount_type_deserializes() {
        let json = r#"{"id": "p1", "itemRef": "x", "x": 0, "y": 0, "mountType": "table"}"#;
        let item: PlacedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.mount_type, MountType::Unknown);
        assert_eq!(item.rotation, 0.0);
    }

    #[test]
    fn test_catalog_lookup_impls() {
        let mut std_map = HashMap::new();
        std_map.insert("display".to_string(), CatalogItem::new(4.0, 0.5));
        let mut fast_map = AHashMap::new();
        fast_map.insert("display".to_string(), CatalogItem::new(4.0, 0.5));

        assert_eq!(std_map.footprint("display").map(|c| c.width), Some(4.0));
        assert_eq!(fast_map.footprint("display").map(|c| c.depth), Some(0.5));
        assert!(fast_map.footprint("speaker").is_none());
    }

    #[test]
    fn test_room_layout_from_json() {
        let json = r#"{
            "room": {"width": 10, "length": 8, "ceilingHeight": 3},
            "placements": [
                {"id": "p1", "itemRef": "rack", "x": 0, "y": 0, "mountType": "rack"}
            ],
            "catalog": {"rack": {"width": 2, "depth": 3, "height": 6}}
        }"#;
        let layout = RoomLayout::from_json_str(json).unwrap();

        assert_eq!(layout.room.ceiling_height, 3.0);
        assert_eq!(layout.placement("p1").unwrap().mount_type, MountType::Rack);
        assert_eq!(layout.catalog.footprint("rack").map(|c| c.depth), Some(3.0));
        assert!(matches!(
            layout.placement("p2"),
            Err(DesignError::NotFound(msg)) if msg == "placement 'p2'"
        ));
    }
}
