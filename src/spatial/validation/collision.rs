//! Collision detection between placed items

use crate::spatial::geometry::bounding_box;
use crate::spatial::placement::{CatalogItem, CatalogLookup, PlacedItem};

pub struct CollisionValidator;

impl CollisionValidator {
    /// Two placements collide when they share a mount type and their
    /// footprints overlap. An item never collides with itself, and items on
    /// different mounts (a ceiling mic over a floor rack) never collide.
    pub fn detect_collision(
        a: &PlacedItem,
        b: &PlacedItem,
        item_a: &CatalogItem,
        item_b: &CatalogItem,
    ) -> bool {
        if a.id == b.id || a.mount_type != b.mount_type {
            return false;
        }
        bounding_box(a, item_a).overlaps(&bounding_box(b, item_b))
    }

    /// Ids of every existing placement that collides with `candidate`
    ///
    /// Returns nothing when the candidate has no catalog entry; existing
    /// placements without one are skipped.
    pub fn detect_collisions<L: CatalogLookup + ?Sized>(
        candidate: &PlacedItem,
        existing: &[PlacedItem],
        lookup: &L,
    ) -> Vec<String> {
        let Some(footprint) = lookup.footprint(&candidate.item_ref) else {
            return Vec::new();
        };

        existing
            .iter()
            .filter(|other| {
                lookup
                    .footprint(&other.item_ref)
                    .is_some_and(|other_footprint| {
                        Self::detect_collision(candidate, other, footprint, other_footprint)
                    })
            })
            .map(|other| {
                tracing::trace!("{} collides with {}", candidate.id, other.id);
                other.id.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::placement::MountType;
    use std::collections::HashMap;

    fn catalog() -> HashMap<String, CatalogItem> {
        let mut catalog = HashMap::new();
        catalog.insert("cabinet".to_string(), CatalogItem::new(4.0, 4.0));
        catalog.insert("mic".to_string(), CatalogItem::new(1.0, 1.0));
        catalog
    }

    #[test]
    fn test_same_id_never_collides() {
        let footprint = CatalogItem::new(4.0, 4.0);
        let a = PlacedItem::new("p1", "cabinet", 0.0, 0.0, MountType::Floor);
        assert!(!CollisionValidator::detect_collision(&a, &a, &footprint, &footprint));
    }

    #[test]
    fn test_different_mounts_never_collide() {
        let footprint = CatalogItem::new(4.0, 4.0);
        let floor = PlacedItem::new("p1", "cabinet", 0.0, 0.0, MountType::Floor);
        let ceiling = PlacedItem::new("p2", "cabinet", 0.0, 0.0, MountType::Ceiling);
        assert!(!CollisionValidator::detect_collision(&floor, &ceiling, &footprint, &footprint));
    }

    #[test]
    fn test_overlapping_same_mount_collides() {
        let footprint = CatalogItem::new(4.0, 4.0);
        let a = PlacedItem::new("p1", "cabinet", 0.0, 0.0, MountType::Floor);
        let b = PlacedItem::new("p2", "cabinet", 2.0, 2.0, MountType::Floor);
        let c = PlacedItem::new("p3", "cabinet", 4.0, 0.0, MountType::Floor);
        assert!(CollisionValidator::detect_collision(&a, &b, &footprint, &footprint));
        assert!(!CollisionValidator::detect_collision(&a, &c, &footprint, &footprint));
    }

    #[test]
    fn test_detect_collisions_lists_ids() {
        let catalog = catalog();
        let existing = vec![
            PlacedItem::new("p1", "cabinet", 0.0, 0.0, MountType::Floor),
            PlacedItem::new("p2", "cabinet", 6.0, 6.0, MountType::Floor),
            PlacedItem::new("p3", "mic", 3.0, 3.0, MountType::Ceiling),
            PlacedItem::new("p4", "cabinet", 3.0, 0.0, MountType::Floor),
        ];
        let candidate = PlacedItem::new("new", "cabinet", 2.0, 2.0, MountType::Floor);

        // p2 only touches the candidate at a corner
        let hits = CollisionValidator::detect_collisions(&candidate, &existing, &catalog);
        assert_eq!(hits, vec!["p1".to_string(), "p4".to_string()]);
    }

    #[test]
    fn test_missing_candidate_entry_reports_nothing() {
        let catalog = catalog();
        let existing = vec![PlacedItem::new("p1", "cabinet", 0.0, 0.0, MountType::Floor)];
        let candidate = PlacedItem::new("new", "projector", 0.0, 0.0, MountType::Floor);

        assert!(CollisionValidator::detect_collisions(&candidate, &existing, &catalog).is_empty());
    }
}
