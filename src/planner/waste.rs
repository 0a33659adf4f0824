//! Waste identification and the undocking return plan (distilled spec
//! §4.8).

use crate::packing::Container;
use jiff::civil::Date;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteReason {
    Expired,
    OutOfUses,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteItem {
    pub item_id: String,
    pub name: String,
    pub reason: WasteReason,
    pub container_id: String,
    pub mass: f64,
    pub start: (f64, f64, f64),
    pub end: (f64, f64, f64),
}

/// Flag every placement across `containers` that is expired as of
/// `today` or has no remaining uses (distilled spec §4.8).
pub fn identify_waste(containers: &[Container], today: Date) -> Vec<WasteItem> {
    let mut waste = Vec::new();
    for container in containers {
        for placement in &container.placements {
            let reason = if placement.item.expiry.is_expired_as_of(today) {
                Some(WasteReason::Expired)
            } else if placement.item.usage_limit.is_depleted() {
                Some(WasteReason::OutOfUses)
            } else {
                None
            };
            let Some(reason) = reason else { continue };
            let (x, y, z) = placement.position;
            let (ow, od, oh) = placement.orientation;
            waste.push(WasteItem {
                item_id: placement.item.id.clone(),
                name: placement.item.name.clone(),
                reason,
                container_id: container.id.clone(),
                mass: placement.item.mass,
                start: (x, y, z),
                end: (x + ow, y + oh, z + od),
            });
        }
    }
    waste
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteMoveStep {
    pub item_id: String,
    pub item_name: String,
    pub from_container: String,
    pub to_container: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteRetrievalStep {
    pub item_id: String,
    pub item_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnManifestEntry {
    pub item_id: String,
    pub name: String,
    pub reason: WasteReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnManifest {
    pub undocking_container_id: String,
    pub return_items: Vec<ReturnManifestEntry>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteReturnPlan {
    pub return_plan: Vec<WasteMoveStep>,
    pub retrieval_steps: Vec<WasteRetrievalStep>,
    pub manifest: ReturnManifest,
}

/// Greedily select waste items (container iteration order) up to
/// `max_weight`, emitting a move step and a retrieval step per selected
/// item (distilled spec §4.8).
pub fn waste_return_plan(
    containers: &[Container],
    undocking_container_id: &str,
    today: Date,
    max_weight: f64,
) -> WasteReturnPlan {
    let waste = identify_waste(containers, today);

    let mut cumulative_weight = 0.0_f64;
    let mut return_plan = Vec::new();
    let mut retrieval_steps = Vec::new();
    let mut manifest_entries = Vec::new();

    for w in &waste {
        if cumulative_weight + w.mass <= max_weight {
            cumulative_weight += w.mass;
            return_plan.push(WasteMoveStep {
                item_id: w.item_id.clone(),
                item_name: w.name.clone(),
                from_container: w.container_id.clone(),
                to_container: undocking_container_id.to_string(),
            });
            retrieval_steps.push(WasteRetrievalStep {
                item_id: w.item_id.clone(),
                item_name: w.name.clone(),
            });
            manifest_entries.push(ReturnManifestEntry {
                item_id: w.item_id.clone(),
                name: w.name.clone(),
                reason: w.reason,
            });
        }
    }

    let total_weight = (cumulative_weight * 100.0).round() / 100.0;
    info!(
        "[WASTE] return plan selects {} of {} waste items ({} kg)",
        return_plan.len(),
        waste.len(),
        total_weight
    );

    WasteReturnPlan {
        return_plan,
        retrieval_steps,
        manifest: ReturnManifest {
            undocking_container_id: undocking_container_id.to_string(),
            return_items: manifest_entries,
            total_weight,
        },
    }
}

/// Remove every placement that is currently expired or out of uses.
/// Deliberately does **not** recompute `free_spaces` afterwards — the
/// distilled spec (§4.8, §9) preserves this behaviour from the source
/// and treats a post-undocking container as sealed; a caller that wants
/// to pack into it again must rebuild its free-space decomposition
/// itself.
pub fn complete_undocking(containers: &mut [Container], today: Date) -> usize {
    let mut removed_count = 0;
    for container in containers.iter_mut() {
        let before = container.placements.len();
        container.placements.retain(|p| {
            !(p.item.expiry.is_expired_as_of(today) || p.item.usage_limit.is_depleted())
        });
        removed_count += before - container.placements.len();
    }
    info!("[WASTE] undocking removed {removed_count} items");
    removed_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expiry, Item, UsageLimit};

    fn expired_item(id: &str) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            width: 10.0,
            depth: 10.0,
            height: 10.0,
            mass: 5.0,
            priority: 1,
            expiry: Expiry::On(Date::constant(2000, 1, 1)),
            usage_limit: UsageLimit::Unlimited,
            preferred_zone: "Z".into(),
        }
    }

    fn depleted_item(id: &str) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            width: 10.0,
            depth: 10.0,
            height: 10.0,
            mass: 3.0,
            priority: 1,
            expiry: Expiry::Never,
            usage_limit: UsageLimit::Limited(0),
            preferred_zone: "Z".into(),
        }
    }

    fn today() -> Date {
        Date::constant(2026, 7, 27)
    }

    #[test]
    fn identifies_expired_and_depleted_items() {
        let mut container = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        container.try_place_item(expired_item("A"));
        container.try_place_item(depleted_item("B"));
        let waste = identify_waste(&[container], today());
        assert_eq!(waste.len(), 2);
        assert_eq!(waste[0].reason, WasteReason::Expired);
        assert_eq!(waste[1].reason, WasteReason::OutOfUses);
    }

    #[test]
    fn waste_return_plan_respects_weight_budget() {
        let mut container = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        container.try_place_item(expired_item("A"));
        container.try_place_item(depleted_item("B"));
        let plan = waste_return_plan(&[container], "UC01", today(), 5.0);
        assert_eq!(plan.return_plan.len(), 1);
        assert_eq!(plan.return_plan[0].item_id, "A");
        assert_eq!(plan.manifest.total_weight, 5.0);
    }

    #[test]
    fn complete_undocking_removes_waste_and_leaves_others() {
        let mut container = Container::new("C1", "Z", 100.0, 100.0, 100.0);
        container.try_place_item(expired_item("A"));
        container.try_place_item(depleted_item("B"));
        container.try_place_item(Item {
            usage_limit: UsageLimit::Limited(5),
            ..depleted_item("C")
        });
        let mut containers = vec![container];
        let removed = complete_undocking(&mut containers, today());
        assert_eq!(removed, 2);
        assert_eq!(containers[0].placements.len(), 1);
        assert_eq!(containers[0].placements[0].item.id, "C");
    }
}
