pub mod rearrangement;
pub mod retrieval;
pub mod waste;

pub use rearrangement::{rearrange, rearrange_with_config, RearrangementResult};
pub use retrieval::{search, SearchQuery, SearchResult};
pub use waste::{complete_undocking, identify_waste, waste_return_plan, WasteItem, WasteReturnPlan};
