//! Rearrangement planning: when an item cannot be placed directly,
//! propose an eviction set on a deep-copied container state and a plan
//! to place the evicted items back (distilled spec §4.7).

use crate::config::{StowageConfig, DEFAULT_STOWAGE_CONFIG};
use crate::model::Item;
use crate::packing::Container;
use log::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RearrangementAction {
    Remove,
    Place,
    PlaceBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RearrangementStep {
    pub action: RearrangementAction,
    pub item_id: String,
    pub container_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RearrangementError {
    pub item_id: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RearrangementResult {
    pub plan: Vec<RearrangementStep>,
    pub errors: Vec<RearrangementError>,
}

impl RearrangementResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Containers ordered preferred-zone-first for a given item, preserving
/// each group's relative input order (distilled spec §4.5/§4.7).
fn containers_to_check(containers: &[Container], preferred_zone: &str) -> Vec<usize> {
    let preferred = containers.iter().enumerate().filter(|(_, c)| c.zone == preferred_zone).map(|(i, _)| i);
    let others = containers.iter().enumerate().filter(|(_, c)| c.zone != preferred_zone).map(|(i, _)| i);
    preferred.chain(others).collect()
}

/// Operates on a deep copy of `containers` (`Container::clone_state`);
/// never mutates the caller's state (distilled spec §4.7, §9). Returns
/// the symbolic plan and any per-item errors; the caller decides whether
/// and how to apply the plan to its real containers.
pub fn rearrange(containers: &[Container], new_items: Vec<Item>) -> RearrangementResult {
    rearrange_with_config(containers, new_items, DEFAULT_STOWAGE_CONFIG)
}

/// As [`rearrange`], but bounds the number of low-priority placements a
/// single container will give up while searching for room
/// (`config.max_rearrangement_evictions`) — a container with hundreds of
/// tiny placements shouldn't be evicted one at a time indefinitely.
pub fn rearrange_with_config(
    containers: &[Container],
    new_items: Vec<Item>,
    config: StowageConfig,
) -> RearrangementResult {
    let mut working: Vec<Container> = containers.iter().map(|c| c.clone_state()).collect();
    let mut plan = Vec::new();
    let mut errors = Vec::new();

    for item in new_items {
        let order = containers_to_check(&working, &item.preferred_zone);

        let mut remaining = item;
        let mut placed_directly = false;
        for &idx in &order {
            match working[idx].place_item(remaining) {
                Ok(()) => {
                    placed_directly = true;
                    break;
                }
                Err(back) => remaining = back,
            }
        }
        if placed_directly {
            continue;
        }
        let item = remaining;

        let mut rearrangement_success = false;
        for &idx in &order {
            // Lowest priority first: these are the cheapest to justify
            // evicting. Identified by id, not index — indices would
            // shift as placements are removed one at a time below.
            let mut removable: Vec<Item> = working[idx].placements.iter().map(|p| p.item.clone()).collect();
            removable.sort_by_key(|i| i.priority);
            removable.truncate(config.max_rearrangement_evictions);

            let mut removed_items: Vec<Item> = Vec::new();
            let mut container_copy = working[idx].clone_state();

            for removed in removable {
                container_copy
                    .placements
                    .retain(|p| p.item.id != removed.id);
                container_copy.reset_free_spaces();

                match container_copy.place_item(item.clone()) {
                    Ok(()) => {
                        removed_items.push(removed);
                        for evicted in &removed_items {
                            plan.push(RearrangementStep {
                                action: RearrangementAction::Remove,
                                item_id: evicted.id.clone(),
                                container_id: working[idx].id.clone(),
                            });
                        }
                        plan.push(RearrangementStep {
                            action: RearrangementAction::Place,
                            item_id: item.id.clone(),
                            container_id: working[idx].id.clone(),
                        });
                        rearrangement_success = true;
                        break;
                    }
                    Err(_) => {
                        removed_items.push(removed);
                    }
                }
            }

            if rearrangement_success {
                working[idx] = container_copy;
                for evicted in removed_items {
                    let mut replaced = false;
                    for &retry_idx in &order {
                        match working[retry_idx].place_item(evicted.clone()) {
                            Ok(()) => {
                                plan.push(RearrangementStep {
                                    action: RearrangementAction::PlaceBack,
                                    item_id: evicted.id.clone(),
                                    container_id: working[retry_idx].id.clone(),
                                });
                                replaced = true;
                                break;
                            }
                            Err(_) => continue,
                        }
                    }
                    if !replaced {
                        warn!("[REARRANGE] could not reposition evicted item {}", evicted.id);
                        errors.push(RearrangementError {
                            item_id: evicted.id.clone(),
                            message: "Could not reposition item.".to_string(),
                        });
                    }
                }
                break;
            }
        }

        if !rearrangement_success {
            errors.push(RearrangementError {
                item_id: item.id.clone(),
                message: "Insufficient space, even after rearrangement.".to_string(),
            });
        }
    }

    info!(
        "[REARRANGE] plan has {} steps, {} errors",
        plan.len(),
        errors.len()
    );
    RearrangementResult { plan, errors }
}
