//! Top-level packing pass: order items and containers, drive placement
//! (distilled spec §4.5). Mirrors the teacher's `LBFBuilder::construct`
//! shape — sort once, place greedily, report what didn't fit instead of
//! failing the job.

use crate::model::Item;
use crate::packing::container::Container;
use log::{debug, info};
use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
pub struct PackResult {
    pub placed: usize,
    pub unplaced: Vec<Item>,
}

/// Sort key from distilled spec §4.5 step 1: `(-volume, priority, expiry,
/// usage_limit)` ascending, so that the largest items are considered
/// first and ties favour higher priority, earlier expiry, lower usage
/// limit. The volume-descending form was chosen over the alternative
/// `(priority, expiry, usage_limit)` form also present in the source, per
/// the spec's explicit resolution of that open question (§9).
fn sort_key(
    item: &Item,
) -> (
    OrderedFloat<f64>,
    i32,
    crate::model::Expiry,
    crate::model::UsageLimit,
) {
    (
        OrderedFloat(-item.volume()),
        item.priority,
        item.expiry,
        item.usage_limit,
    )
}

/// Drive placement of `items` into `containers`, preferring each item's
/// preferred zone then falling back to every other container in input
/// order. Never fails the whole job — items that fit nowhere are
/// returned in `unplaced` (distilled spec §4.5: "Failure semantics").
pub fn pack_items(containers: &mut [Container], items: Vec<Item>) -> PackResult {
    let mut sorted_items = items;
    sorted_items.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut placed = 0;
    let mut unplaced = Vec::new();

    for item in sorted_items {
        let preferred_zone = item.preferred_zone.clone();
        let preferred_idx = containers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.zone == preferred_zone)
            .map(|(i, _)| i);
        let other_idx = containers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.zone != preferred_zone)
            .map(|(i, _)| i);

        let mut remaining = item;
        let mut placed_here = false;
        for idx in preferred_idx.chain(other_idx) {
            match containers[idx].place_item(remaining) {
                Ok(()) => {
                    placed += 1;
                    placed_here = true;
                    debug!(
                        "[PACK] placed {} in container {} (zone {})",
                        containers[idx].placements.last().unwrap().item.id,
                        containers[idx].id,
                        containers[idx].zone
                    );
                    break;
                }
                Err(item_back) => remaining = item_back,
            }
        }
        if !placed_here {
            unplaced.push(remaining);
        }
    }

    info!("[PACK] placed {placed} items, {} unplaced", unplaced.len());
    PackResult { placed, unplaced }
}
