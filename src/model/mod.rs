pub mod item;

pub use item::{Expiry, Item, UsageLimit};
