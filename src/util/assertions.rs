//! Bool-returning invariant checks for `debug_assert!`, in the style of
//! the teacher's `util/assertions.rs`. A `false` here indicates a core
//! bug (distilled spec §7: invariant violations are "fatal assertion",
//! not reportable conditions), so these are only ever wired into
//! `debug_assert!`, never into the error-reporting paths.

use crate::geometry::TOL;
use crate::packing::Container;

/// P1: every pair of distinct placements has an overlap volume of zero
/// (interiors disjoint).
pub fn placements_do_not_overlap(container: &Container) -> bool {
    let placements = &container.placements;
    for i in 0..placements.len() {
        for j in (i + 1)..placements.len() {
            if placements[i].bounds().overlaps(&placements[j].bounds()) {
                return false;
            }
        }
    }
    true
}

/// P2: every placement lies within the container's interior box, within
/// [`TOL`].
pub fn placements_are_contained(container: &Container) -> bool {
    container.placements.iter().all(|p| {
        let (x1, y1, z1, x2, y2, z2) = p.bounds().bounds();
        x1 >= -TOL
            && y1 >= -TOL
            && z1 >= -TOL
            && x2 <= container.width + TOL
            && y2 <= container.height + TOL
            && z2 <= container.depth + TOL
    })
}

/// P3: every pair of free spaces has disjoint interiors.
pub fn free_spaces_are_disjoint(container: &Container) -> bool {
    let spaces = &container.free_spaces;
    for i in 0..spaces.len() {
        for j in (i + 1)..spaces.len() {
            if spaces[i].bounds.overlaps(&spaces[j].bounds) {
                return false;
            }
        }
    }
    true
}

/// P4: placed volume + free volume equals the interior volume, within a
/// tolerance that grows with placement count (accumulated slab error).
pub fn volume_is_conserved(container: &Container) -> bool {
    let n = (container.placements.len() + container.free_spaces.len()) as f64;
    let diff = (container.placed_volume() + container.free_volume() - container.interior_volume()).abs();
    diff <= n * TOL + TOL
}

/// P5: each placement's orientation is a permutation of its item's
/// original dimensions.
pub fn orientation_is_a_permutation(container: &Container) -> bool {
    container.placements.iter().all(|p| {
        let mut observed = [p.orientation.0, p.orientation.1, p.orientation.2];
        let mut expected = [p.item.width, p.item.depth, p.item.height];
        observed.sort_by(|a, b| a.partial_cmp(b).unwrap());
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        observed
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (a - b).abs() <= TOL)
    })
}

/// Runs every per-container invariant check; used after a placement in
/// debug builds and directly by the test suite.
pub fn container_is_consistent(container: &Container) -> bool {
    placements_do_not_overlap(container)
        && placements_are_contained(container)
        && free_spaces_are_disjoint(container)
        && volume_is_conserved(container)
        && orientation_is_a_permutation(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expiry, Item, UsageLimit};

    #[test]
    fn fresh_container_is_consistent() {
        let c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        assert!(container_is_consistent(&c));
    }

    #[test]
    fn container_after_placements_is_consistent() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        for i in 0..5 {
            c.try_place_item(Item {
                id: format!("I{i}"),
                name: format!("I{i}"),
                width: 20.0,
                depth: 20.0,
                height: 20.0,
                mass: 1.0,
                priority: 0,
                expiry: Expiry::Never,
                usage_limit: UsageLimit::Unlimited,
                preferred_zone: "Z".into(),
            });
        }
        assert!(container_is_consistent(&c));
    }
}
