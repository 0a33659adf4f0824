//! Cargo item descriptor. An `Item` is immutable once constructed; the
//! packer and planners only ever read it or clone it whole.

use itertools::Itertools;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Replaces the Python source's `"N/A"` sentinel / `float("inf")` for
/// expiry dates (see §9 re-architecture notes: "Optional sentinels").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Expiry {
    On(Date),
    /// Sorts after every real date (distilled spec §4.5). Declared last
    /// so the derived `Ord` places it last too.
    Never,
}

impl Expiry {
    pub fn is_expired_as_of(&self, today: Date) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::On(d) => *d < today,
        }
    }
}

/// Replaces the `"N/A"` / `float("inf")` sentinel for usage counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UsageLimit {
    Limited(u32),
    /// Sorts after every finite count (distilled spec §4.5). Declared
    /// last so the derived `Ord` places it last too.
    Unlimited,
}

impl UsageLimit {
    pub fn is_depleted(&self) -> bool {
        matches!(self, UsageLimit::Limited(0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub mass: f64,
    pub priority: i32,
    pub expiry: Expiry,
    pub usage_limit: UsageLimit,
    pub preferred_zone: String,
}

impl Item {
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }

    /// Distinct permutations of `(width, depth, height)`, in the stable
    /// order lexicographic by `(ow, oh, od)` (distilled spec §4.1).
    pub fn orientations(&self) -> Vec<(f64, f64, f64)> {
        let dims = [self.width, self.depth, self.height];
        let mut orients = (0..3)
            .permutations(3)
            .map(|idx| (dims[idx[0]], dims[idx[1]], dims[idx[2]]))
            .unique_by(|&(w, d, h)| (w.to_bits(), d.to_bits(), h.to_bits()))
            .collect::<Vec<_>>();
        orients.sort_by(|a, b| {
            (a.0, a.2, a.1)
                .partial_cmp(&(b.0, b.2, b.1))
                .expect("item dimensions must not be NaN")
        });
        orients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(w: f64, d: f64, h: f64) -> Item {
        Item {
            id: "i".into(),
            name: "i".into(),
            width: w,
            depth: d,
            height: h,
            mass: 1.0,
            priority: 0,
            expiry: Expiry::Never,
            usage_limit: UsageLimit::Unlimited,
            preferred_zone: "Z".into(),
        }
    }

    #[test]
    fn cube_has_one_orientation() {
        assert_eq!(item(5.0, 5.0, 5.0).orientations().len(), 1);
    }

    #[test]
    fn two_equal_dims_has_three_orientations() {
        assert_eq!(item(5.0, 5.0, 7.0).orientations().len(), 3);
    }

    #[test]
    fn distinct_dims_has_six_orientations() {
        assert_eq!(item(3.0, 5.0, 7.0).orientations().len(), 6);
    }

    #[test]
    fn expiry_orders_never_last() {
        let d = Date::constant(2024, 1, 1);
        assert!(Expiry::On(d) < Expiry::Never);
    }

    #[test]
    fn usage_limit_orders_unlimited_last() {
        assert!(UsageLimit::Limited(5) < UsageLimit::Unlimited);
    }
}
