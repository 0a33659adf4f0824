//! Container: the mutable heart of the packer. Holds placements plus the
//! disjoint free-space decomposition, and knows how to place a single
//! item, trim, and merge (distilled spec §4.3, §4.4).

use crate::geometry::Aabb;
use crate::model::Item;
use crate::packing::free_space::{try_merge, FreeSpace};
use crate::packing::placement::Placement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub zone: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub placements: Vec<Placement>,
    pub free_spaces: Vec<FreeSpace>,
}

impl Container {
    pub fn new(id: impl Into<String>, zone: impl Into<String>, width: f64, depth: f64, height: f64) -> Self {
        Container {
            id: id.into(),
            zone: zone.into(),
            width,
            depth,
            height,
            placements: Vec::new(),
            free_spaces: vec![FreeSpace::new(0.0, 0.0, 0.0, width, height, depth)],
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.placements.iter().map(|p| p.item.mass).sum()
    }

    /// An owned deep copy, for the rearrangement planner to speculate on
    /// without touching the caller's state (distilled spec §4.7, §9).
    pub fn clone_state(&self) -> Container {
        self.clone()
    }

    /// Try every free space (back-bottom-left first) against every
    /// orientation (stable order) and place at the first fit. On success
    /// appends a `Placement`, updates `free_spaces` in place, and
    /// returns `Ok(())`; on failure the item is handed back unchanged so
    /// the caller can try another container (distilled spec §4.4).
    pub fn place_item(&mut self, item: Item) -> Result<(), Item> {
        self.free_spaces
            .sort_by(|a, b| (a.z(), a.y(), a.x()).partial_cmp(&(b.z(), b.y(), b.x())).unwrap());
        let orientations = item.orientations();

        for fs_idx in 0..self.free_spaces.len() {
            let fs = &self.free_spaces[fs_idx];
            for &orient in &orientations {
                if fs.fits(orient) {
                    let position = (fs.x(), fs.y(), fs.z());
                    let placed_bounds = Aabb::new(
                        position.0,
                        position.1,
                        position.2,
                        orient.0,
                        orient.2,
                        orient.1,
                    );
                    self.placements.push(Placement {
                        item,
                        position,
                        orientation: orient,
                    });
                    self.update_free_spaces_with_trim(&placed_bounds);
                    return Ok(());
                }
            }
        }
        Err(item)
    }

    /// Convenience boolean form for call sites that only care whether
    /// the item fit, not reclaiming it on failure.
    pub fn try_place_item(&mut self, item: Item) -> bool {
        self.place_item(item).is_ok()
    }

    fn update_free_spaces_with_trim(&mut self, placed_bounds: &Aabb) {
        let mut trimmed = Vec::with_capacity(self.free_spaces.len());
        for fs in &self.free_spaces {
            trimmed.extend(fs.trim(placed_bounds));
        }
        self.free_spaces = trimmed.into_iter().filter(|fs| !fs.is_degenerate()).collect();
        self.merge_free_spaces();
    }

    /// Fixed-point pairwise merge pass over `free_spaces` (distilled spec
    /// §4.4). Deterministic in array order; idempotent once no pair
    /// merges (testable property P7).
    pub fn merge_free_spaces(&mut self) {
        loop {
            let mut merged_any = false;
            let mut result: Vec<FreeSpace> = Vec::with_capacity(self.free_spaces.len());
            let mut used = vec![false; self.free_spaces.len()];

            for i in 0..self.free_spaces.len() {
                if used[i] {
                    continue;
                }
                let mut current = self.free_spaces[i].clone();
                for j in (i + 1)..self.free_spaces.len() {
                    if used[j] {
                        continue;
                    }
                    if let Some(merged) = try_merge(&current, &self.free_spaces[j]) {
                        current = merged;
                        used[j] = true;
                        merged_any = true;
                    }
                }
                result.push(current);
            }

            self.free_spaces = result;
            if !merged_any {
                break;
            }
        }
    }

    /// Reset `free_spaces` to a single box covering the whole interior,
    /// then re-merge (trivially a no-op merge). Used by the
    /// rearrangement planner after evicting a placement — deliberately
    /// loses the incremental decomposition (distilled spec §4.7, §9:
    /// "known approximation").
    pub fn reset_free_spaces(&mut self) {
        self.free_spaces = vec![FreeSpace::new(0.0, 0.0, 0.0, self.width, self.height, self.depth)];
        self.merge_free_spaces();
    }

    /// Sum of free-space volumes, for the volume-conservation property
    /// (P4).
    pub fn free_volume(&self) -> f64 {
        self.free_spaces.iter().map(|fs| fs.volume()).sum()
    }

    pub fn interior_volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    pub fn placed_volume(&self) -> f64 {
        self.placements.iter().map(|p| p.bounds().volume()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expiry, UsageLimit};

    fn cube_item(id: &str, side: f64) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            width: side,
            depth: side,
            height: side,
            mass: 1.0,
            priority: 0,
            expiry: Expiry::Never,
            usage_limit: UsageLimit::Unlimited,
            preferred_zone: "Z".into(),
        }
    }

    #[test]
    fn single_cube_placement_scenario_1() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        let placed = c.try_place_item(cube_item("I1", 50.0));
        assert!(placed);
        let p = &c.placements[0];
        assert_eq!(p.position, (0.0, 0.0, 0.0));
        assert_eq!(p.orientation, (50.0, 50.0, 50.0));

        let mut volumes: Vec<f64> = c.free_spaces.iter().map(|fs| fs.volume()).collect();
        volumes.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut expected = vec![50.0 * 100.0 * 100.0, 50.0 * 50.0 * 100.0, 50.0 * 50.0 * 50.0];
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(volumes.len(), 3);
        for (v, e) in volumes.iter().zip(expected.iter()) {
            assert!((v - e).abs() < 1e-6);
        }
    }

    #[test]
    fn eight_unit_cubes_scenario_2() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        for i in 0..8 {
            assert!(c.try_place_item(cube_item(&format!("I{i}"), 50.0)));
        }
        assert_eq!(c.placements.len(), 8);
        assert!((c.placed_volume() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn overflow_by_one_scenario_3() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        let mut placed_count = 0;
        for i in 0..9 {
            if c.try_place_item(cube_item(&format!("I{i}"), 50.0)) {
                placed_count += 1;
            }
        }
        assert_eq!(placed_count, 8);
    }

    #[test]
    fn rotation_required_scenario_5() {
        let mut c = Container::new("C1", "Z", 60.0, 50.0, 40.0);
        let item = Item {
            id: "I1".into(),
            name: "I1".into(),
            width: 40.0,
            depth: 50.0,
            height: 30.0,
            mass: 1.0,
            priority: 0,
            expiry: Expiry::Never,
            usage_limit: UsageLimit::Unlimited,
            preferred_zone: "Z".into(),
        };
        assert!(c.try_place_item(item));
        let p = &c.placements[0];
        assert_eq!(p.position, (0.0, 0.0, 0.0));
    }

    #[test]
    fn volume_conservation_holds_after_several_placements() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        for i in 0..5 {
            c.try_place_item(cube_item(&format!("I{i}"), 40.0));
        }
        let diff = (c.placed_volume() + c.free_volume() - c.interior_volume()).abs();
        assert!(diff < 1e-6 * c.placements.len() as f64 + 1e-6);
    }

    #[test]
    fn merge_is_idempotent_p7() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        c.try_place_item(cube_item("I0", 30.0));
        c.merge_free_spaces();
        let before = c.free_spaces.clone();
        c.merge_free_spaces();
        assert_eq!(before.len(), c.free_spaces.len());
    }

    #[test]
    fn free_spaces_remain_disjoint_p3() {
        let mut c = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        for i in 0..4 {
            c.try_place_item(cube_item(&format!("I{i}"), 30.0));
        }
        for i in 0..c.free_spaces.len() {
            for j in (i + 1)..c.free_spaces.len() {
                assert!(!c.free_spaces[i].bounds.overlaps(&c.free_spaces[j].bounds));
            }
        }
    }
}
