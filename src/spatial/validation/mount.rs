//! Mount-type zoning: wall items on walls, racks in corners

use crate::spatial::geometry::{is_near_corner, is_near_wall};
use crate::spatial::placement::{MountType, PlacedItem, Room};

pub struct MountValidator;

impl MountValidator {
    /// Check the item's anchor against the zone its mount type requires
    ///
    /// Floor, ceiling and unrecognised mounts are valid anywhere.
    pub fn is_valid_mount_position(
        item: &PlacedItem,
        room: &Room,
        wall_threshold: f64,
        corner_threshold: f64,
    ) -> bool {
        match item.mount_type {
            MountType::Floor | MountType::Ceiling => true,
            MountType::Wall => is_near_wall(item.position(), room, wall_threshold),
            MountType::Rack => is_near_corner(item.position(), room, corner_threshold),
            MountType::Unknown => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(mount_type: MountType, x: f64, y: f64) -> bool {
        let item = PlacedItem::new("p1", "thing", x, y, mount_type);
        MountValidator::is_valid_mount_position(&item, &Room::new(10.0, 10.0), 2.0, 3.0)
    }

    #[test]
    fn test_wall_mount() {
        assert!(check(MountType::Wall, 1.0, 5.0));
        assert!(check(MountType::Wall, 5.0, 9.0));
        assert!(!check(MountType::Wall, 5.0, 5.0));
    }

    #[test]
    fn test_rack_needs_corner() {
        assert!(check(MountType::Rack, 1.0, 1.0));
        assert!(check(MountType::Rack, 8.0, 8.0));
        assert!(!check(MountType::Rack, 1.0, 5.0));
    }

    #[test]
    fn test_unrestricted_mounts() {
        assert!(check(MountType::Floor, 5.0, 5.0));
        assert!(check(MountType::Ceiling, 5.0, 5.0));
        assert!(check(MountType::Unknown, 5.0, 5.0));
    }
}
