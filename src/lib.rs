use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod packing;
pub mod planner;
pub mod util;

pub use config::{StowageConfig, DEFAULT_STOWAGE_CONFIG};
pub use error::StowageError;
pub use model::{Expiry, Item, UsageLimit};
pub use packing::{pack_items as pack, Container, FreeSpace, PackResult, Placement};
pub use planner::{
    complete_undocking, identify_waste, rearrange, rearrange_with_config, search,
    waste_return_plan, RearrangementResult, SearchQuery, SearchResult, WasteItem, WasteReturnPlan,
};

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
