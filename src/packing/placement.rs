use crate::geometry::Aabb;
use crate::model::Item;
use serde::{Deserialize, Serialize};

/// `(item, position, orientation)` — the assignment of an item inside a
/// specific container (distilled spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item: Item,
    pub position: (f64, f64, f64),
    pub orientation: (f64, f64, f64),
}

impl Placement {
    pub fn bounds(&self) -> Aabb {
        let (x, y, z) = self.position;
        let (ow, od, oh) = self.orientation;
        Aabb::new(x, y, z, ow, oh, od)
    }

    /// `z` coordinate of the face nearest the container's open face.
    pub fn front_z(&self) -> f64 {
        self.position.2 + self.orientation.1
    }
}
