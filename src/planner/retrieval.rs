//! Retrieval planning: for an item already placed in a container, decide
//! whether it is directly visible at the open face or whether other
//! placements must be set aside first (distilled spec §4.6).

use crate::geometry::approx_equal;
use crate::packing::Container;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalAction {
    Retrieve,
    SetAside,
    PlaceBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalStep {
    pub step: usize,
    pub action: RetrievalAction,
    pub item_id: String,
    pub item_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found {
        item_id: String,
        name: String,
        container_id: String,
        zone: String,
        start: (f64, f64, f64),
        end: (f64, f64, f64),
        retrieval_steps: Vec<RetrievalStep>,
    },
    NotFound,
    InvalidQuery,
}

#[derive(Debug, Clone, Copy)]
pub enum SearchQuery<'a> {
    ById(&'a str),
    ByName(&'a str),
}

fn is_visible(front_z: f64, container_depth: f64) -> bool {
    approx_equal(front_z, container_depth)
}

/// Obstructors are every other placement in the same container whose
/// front face is further from the container's back wall than the
/// target's. This is a front-plane (z-only) test: it does not check
/// whether the obstructor actually overlaps the target in x/y, so it can
/// over-report obstructions along a straight +z pull path. The distilled
/// spec leaves this open (§9) rather than calling it a bug, so it is
/// implemented exactly as specified.
pub fn retrieval_steps(container: &Container, target_item_id: &str) -> Vec<RetrievalStep> {
    let Some(target) = container.placements.iter().find(|p| p.item.id == target_item_id) else {
        return Vec::new();
    };

    if is_visible(target.front_z(), container.depth) {
        return vec![RetrievalStep {
            step: 0,
            action: RetrievalAction::Retrieve,
            item_id: target.item.id.clone(),
            item_name: target.item.name.clone(),
        }];
    }

    let target_front = target.front_z();
    let obstructors: Vec<_> = container
        .placements
        .iter()
        .filter(|p| p.item.id != target_item_id && p.front_z() > target_front + crate::geometry::TOL)
        .collect();

    let mut steps = Vec::with_capacity(obstructors.len() * 2 + 1);
    let mut step_num = 1;
    for obstructor in &obstructors {
        steps.push(RetrievalStep {
            step: step_num,
            action: RetrievalAction::SetAside,
            item_id: obstructor.item.id.clone(),
            item_name: obstructor.item.name.clone(),
        });
        step_num += 1;
    }
    steps.push(RetrievalStep {
        step: step_num,
        action: RetrievalAction::Retrieve,
        item_id: target.item.id.clone(),
        item_name: target.item.name.clone(),
    });
    step_num += 1;
    for obstructor in obstructors.iter().rev() {
        steps.push(RetrievalStep {
            step: step_num,
            action: RetrievalAction::PlaceBack,
            item_id: obstructor.item.id.clone(),
            item_name: obstructor.item.name.clone(),
        });
        step_num += 1;
    }
    steps
}

/// Locate an item by id or name across all containers and compute its
/// retrieval plan (distilled spec §4.6, §6 `search`).
pub fn search(containers: &[Container], query: SearchQuery) -> SearchResult {
    let (by_id, by_name) = match query {
        SearchQuery::ById(id) if id.is_empty() => return SearchResult::InvalidQuery,
        SearchQuery::ByName(name) if name.is_empty() => return SearchResult::InvalidQuery,
        SearchQuery::ById(id) => (Some(id), None),
        SearchQuery::ByName(name) => (None, Some(name)),
    };

    for container in containers {
        for placement in &container.placements {
            let matches = by_id.map(|id| placement.item.id == id).unwrap_or(false)
                || by_name.map(|name| placement.item.name == name).unwrap_or(false);
            if matches {
                let steps = retrieval_steps(container, &placement.item.id);
                let (x, y, z) = placement.position;
                let (ow, od, oh) = placement.orientation;
                return SearchResult::Found {
                    item_id: placement.item.id.clone(),
                    name: placement.item.name.clone(),
                    container_id: container.id.clone(),
                    zone: container.zone.clone(),
                    start: (x, y, z),
                    end: (x + ow, y + oh, z + od),
                    retrieval_steps: steps,
                };
            }
        }
    }
    SearchResult::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expiry, Item, UsageLimit};

    fn item(id: &str) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            width: 50.0,
            depth: 50.0,
            height: 50.0,
            mass: 1.0,
            priority: 0,
            expiry: Expiry::Never,
            usage_limit: UsageLimit::Unlimited,
            preferred_zone: "Z".into(),
        }
    }

    /// Scenario 6: A behind B along z; B is flush with the open face.
    #[test]
    fn retrieval_obstruction_scenario_6() {
        use crate::packing::Placement;

        let mut container = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        container.placements.push(Placement {
            item: item("A"),
            position: (0.0, 0.0, 0.0),
            orientation: (50.0, 50.0, 50.0),
        });
        container.placements.push(Placement {
            item: item("B"),
            position: (0.0, 0.0, 50.0),
            orientation: (50.0, 50.0, 50.0),
        });

        let steps_a = retrieval_steps(&container, "A");
        assert_eq!(steps_a.len(), 3);
        assert_eq!(steps_a[0].action, RetrievalAction::SetAside);
        assert_eq!(steps_a[0].item_id, "B");
        assert_eq!(steps_a[1].action, RetrievalAction::Retrieve);
        assert_eq!(steps_a[2].action, RetrievalAction::PlaceBack);
        assert_eq!(steps_a[2].item_id, "B");

        let steps_b = retrieval_steps(&container, "B");
        assert_eq!(steps_b.len(), 1);
        assert_eq!(steps_b[0].action, RetrievalAction::Retrieve);
    }

    #[test]
    fn search_without_id_or_name_is_invalid_query() {
        let containers: Vec<Container> = Vec::new();
        assert_eq!(search(&containers, SearchQuery::ById("")), SearchResult::InvalidQuery);
    }

    #[test]
    fn search_missing_item_is_not_found() {
        let containers = vec![Container::new("C1", "Z", 100.0, 100.0, 100.0)];
        assert_eq!(search(&containers, SearchQuery::ById("ghost")), SearchResult::NotFound);
    }
}
