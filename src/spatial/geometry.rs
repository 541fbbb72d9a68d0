//! Geometry helpers for placement: snapping, rotation, bounding boxes and
//! wall alignment
//!
//! Editor gestures (drag, rotate handle, keyboard nudge) call these directly.

use serde::{Deserialize, Serialize};

use super::placement::{CatalogItem, PlacedItem, Position, Room};

/// Default grid unit for snapping (room units)
pub const DEFAULT_GRID_SIZE: f64 = 1.0;

/// Default rotation increment (degrees)
pub const DEFAULT_ROTATION_STEP: f64 = 15.0;

/// Axis-aligned bounding box, `(x1, y1)` top-left and `(x2, y2)` bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Strict overlap; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// True if the box lies inside `[0, width] x [0, length]`
    pub fn within(&self, width: f64, length: f64) -> bool {
        self.x1 >= 0.0 && self.y1 >= 0.0 && self.x2 <= width && self.y2 <= length
    }
}

/// One of the four room edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Round half towards positive infinity, matching the editor's rounding
fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

/// Snap a coordinate to the nearest multiple of `grid_size`
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    // adding +0.0 turns -0.0 into 0.0
    round_half_up(value / grid_size) * grid_size + 0.0
}

/// Reduce an angle to [0, 360)
pub fn normalize_rotation(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0 + 0.0
}

/// Snap an angle to the nearest `step`, then normalize
pub fn snap_rotation(angle: f64, step: f64) -> f64 {
    normalize_rotation(round_half_up(angle / step) * step)
}

/// Rotate by `delta` degrees, landing on the `step` grid
pub fn rotate_by(current: f64, delta: f64, step: f64) -> f64 {
    snap_rotation(current + delta, step)
}

/// Rotation-aware bounding box of a placed item
///
/// Only quarter turns to 90° and 270° swap width and depth; any other angle
/// keeps the unrotated footprint. Saved layouts depend on this.
pub fn bounding_box(item: &PlacedItem, footprint: &CatalogItem) -> BoundingBox {
    let rotation = normalize_rotation(item.rotation);
    let (width, depth) = if rotation == 90.0 || rotation == 270.0 {
        (footprint.depth, footprint.width)
    } else {
        (footprint.width, footprint.depth)
    };

    BoundingBox {
        x1: item.x,
        y1: item.y,
        x2: item.x + width,
        y2: item.y + depth,
    }
}

pub fn boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.overlaps(b)
}

/// Nearest room edge; ties resolve left, right, top, bottom
pub fn nearest_wall(position: Position, room: &Room) -> Wall {
    let distances = [
        (Wall::Left, position.x.abs()),
        (Wall::Right, (room.width - position.x).abs()),
        (Wall::Top, position.y.abs()),
        (Wall::Bottom, (room.length - position.y).abs()),
    ];

    let mut best = distances[0];
    for candidate in &distances[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Snap a position onto a wall (the nearest one when `wall` is `None`)
pub fn align_to_wall(position: Position, room: &Room, wall: Option<Wall>) -> Position {
    let wall = wall.unwrap_or_else(|| nearest_wall(position, room));
    match wall {
        Wall::Left => Position::new(0.0, position.y),
        Wall::Right => Position::new(room.width, position.y),
        Wall::Top => Position::new(position.x, 0.0),
        Wall::Bottom => Position::new(position.x, room.length),
    }
}

/// Within `threshold` of any of the four edges
pub fn is_near_wall(position: Position, room: &Room, threshold: f64) -> bool {
    position.x <= threshold
        || position.x >= room.width - threshold
        || position.y <= threshold
        || position.y >= room.length - threshold
}

/// Within `threshold` of an edge on both axes at once
pub fn is_near_corner(position: Position, room: &Room, threshold: f64) -> bool {
    let near_x = position.x <= threshold || position.x >= room.width - threshold;
    let near_y = position.y <= threshold || position.y >= room.length - threshold;
    near_x && near_y
}

/// Convert a drop point into a grid-snapped top-left anchor
///
/// With `center_on_drop` and a footprint, the item is centred on the drop
/// point before snapping.
pub fn calculate_placement_position(
    drop: Position,
    footprint: Option<&CatalogItem>,
    center_on_drop: bool,
    grid_size: f64,
) -> Position {
    let (mut x, mut y) = (drop.x, drop.y);
    if center_on_drop {
        if let Some(footprint) = footprint {
            x -= footprint.width / 2.0;
            y -= footprint.depth / 2.0;
        }
    }
    Position::new(snap_to_grid(x, grid_size), snap_to_grid(y, grid_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::placement::MountType;

    fn floor_item(x: f64, y: f64, rotation: f64) -> PlacedItem {
        PlacedItem::new("p1", "desk", x, y, MountType::Floor).with_rotation(rotation)
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(2.4, 1.0), 2.0);
        assert_eq!(snap_to_grid(2.5, 1.0), 3.0);
        assert_eq!(snap_to_grid(-2.5, 1.0), -2.0);
        assert_eq!(snap_to_grid(7.0, 5.0), 5.0);
        assert_eq!(snap_to_grid(0.74, 0.5), 0.5);
    }

    #[test]
    fn test_snap_to_grid_normalizes_negative_zero() {
        let snapped = snap_to_grid(-0.3, 1.0);
        assert_eq!(snapped, 0.0);
        assert!(snapped.is_sign_positive());
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(-10.0), 350.0);
        assert_eq!(normalize_rotation(370.0), 10.0);
        assert_eq!(normalize_rotation(720.0), 0.0);
        assert_eq!(normalize_rotation(-360.0), 0.0);

        let zero = normalize_rotation(-0.0);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
    }

    #[test]
    fn test_rotate_by_snaps_to_step() {
        // 370 snaps to 375, which normalizes to 15
        assert_eq!(rotate_by(350.0, 20.0, DEFAULT_ROTATION_STEP), 15.0);
        assert_eq!(rotate_by(0.0, 7.0, DEFAULT_ROTATION_STEP), 0.0);
        assert_eq!(rotate_by(0.0, 8.0, DEFAULT_ROTATION_STEP), 15.0);
        assert_eq!(rotate_by(0.0, -90.0, DEFAULT_ROTATION_STEP), 270.0);
        assert_eq!(rotate_by(345.0, 15.0, DEFAULT_ROTATION_STEP), 0.0);
    }

    #[test]
    fn test_bounding_box_swaps_at_quarter_turns() {
        let footprint = CatalogItem::new(6.0, 2.0);

        let upright = bounding_box(&floor_item(1.0, 1.0, 0.0), &footprint);
        assert_eq!((upright.width(), upright.height()), (6.0, 2.0));

        let turned = bounding_box(&floor_item(1.0, 1.0, 90.0), &footprint);
        assert_eq!((turned.width(), turned.height()), (2.0, 6.0));
        assert_eq!(turned.x1, 1.0);
        assert_eq!(turned.y2, 7.0);

        let turned_back = bounding_box(&floor_item(1.0, 1.0, 270.0), &footprint);
        assert_eq!((turned_back.width(), turned_back.height()), (2.0, 6.0));

        let flipped = bounding_box(&floor_item(1.0, 1.0, 180.0), &footprint);
        assert_eq!((flipped.width(), flipped.height()), (6.0, 2.0));
    }

    #[test]
    fn test_bounding_box_ignores_diagonal_rotation() {
        let footprint = CatalogItem::new(6.0, 2.0);
        let diagonal = bounding_box(&floor_item(0.0, 0.0, 45.0), &footprint);
        assert_eq!((diagonal.width(), diagonal.height()), (6.0, 2.0));
    }

    #[test]
    fn test_boxes_overlap_is_strict() {
        let a = BoundingBox { x1: 0.0, y1: 0.0, x2: 4.0, y2: 4.0 };
        let b = BoundingBox { x1: 2.0, y1: 2.0, x2: 6.0, y2: 6.0 };
        let touching = BoundingBox { x1: 4.0, y1: 0.0, x2: 8.0, y2: 4.0 };

        assert!(boxes_overlap(&a, &b));
        assert!(boxes_overlap(&b, &a));
        assert!(!boxes_overlap(&a, &touching));
    }

    #[test]
    fn test_align_to_named_wall() {
        let room = Room::new(10.0, 8.0);
        let pos = Position::new(4.0, 3.0);

        assert_eq!(align_to_wall(pos, &room, Some(Wall::Left)), Position::new(0.0, 3.0));
        assert_eq!(align_to_wall(pos, &room, Some(Wall::Right)), Position::new(10.0, 3.0));
        assert_eq!(align_to_wall(pos, &room, Some(Wall::Top)), Position::new(4.0, 0.0));
        assert_eq!(align_to_wall(pos, &room, Some(Wall::Bottom)), Position::new(4.0, 8.0));
    }

    #[test]
    fn test_align_to_nearest_wall() {
        let room = Room::new(10.0, 10.0);
        assert_eq!(align_to_wall(Position::new(8.5, 5.0), &room, None), Position::new(10.0, 5.0));
        assert_eq!(align_to_wall(Position::new(5.0, 9.0), &room, None), Position::new(5.0, 10.0));
        assert_eq!(align_to_wall(Position::new(5.0, 1.0), &room, None), Position::new(5.0, 0.0));
    }

    #[test]
    fn test_nearest_wall_tie_order() {
        let room = Room::new(10.0, 10.0);
        // centre: all four equal, left wins
        assert_eq!(nearest_wall(Position::new(5.0, 5.0), &room), Wall::Left);
        // right and top tie
        assert_eq!(nearest_wall(Position::new(8.0, 2.0), &room), Wall::Right);
        // top and bottom tie, both nearer than the sides
        assert_eq!(nearest_wall(Position::new(5.0, 3.0), &Room::new(10.0, 6.0)), Wall::Top);
    }

    #[test]
    fn test_wall_and_corner_proximity() {
        let room = Room::new(10.0, 10.0);
        assert!(is_near_wall(Position::new(1.0, 5.0), &room, 2.0));
        assert!(is_near_wall(Position::new(5.0, 8.0), &room, 2.0));
        assert!(!is_near_wall(Position::new(5.0, 5.0), &room, 2.0));

        assert!(is_near_corner(Position::new(1.0, 1.0), &room, 3.0));
        assert!(is_near_corner(Position::new(8.0, 9.0), &room, 3.0));
        assert!(!is_near_corner(Position::new(1.0, 5.0), &room, 3.0));
    }

    #[test]
    fn test_calculate_placement_position() {
        let footprint = CatalogItem::new(4.0, 2.0);
        let drop = Position::new(5.2, 5.2);

        assert_eq!(
            calculate_placement_position(drop, Some(&footprint), true, 1.0),
            Position::new(3.0, 4.0)
        );
        assert_eq!(
            calculate_placement_position(drop, Some(&footprint), false, 1.0),
            Position::new(5.0, 5.0)
        );
        assert_eq!(
            calculate_placement_position(drop, None, true, 1.0),
            Position::new(5.0, 5.0)
        );
    }
}
