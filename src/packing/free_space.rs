//! A free cuboid inside a container, plus the fit/merge/trim operations
//! that maintain the disjoint free-space decomposition (distilled spec
//! §4.2, §4.3).

use crate::geometry::{approx_equal, Aabb, TOL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSpace {
    pub bounds: Aabb,
    /// Diagnostic only — which trim produced this slab. Never read by
    /// placement logic.
    pub source: Option<String>,
}

impl FreeSpace {
    pub fn new(x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> Self {
        FreeSpace {
            bounds: Aabb::new(x, y, z, width, height, depth),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn x(&self) -> f64 {
        self.bounds.x
    }
    pub fn y(&self) -> f64 {
        self.bounds.y
    }
    pub fn z(&self) -> f64 {
        self.bounds.z
    }
    pub fn width(&self) -> f64 {
        self.bounds.width
    }
    pub fn height(&self) -> f64 {
        self.bounds.height
    }
    pub fn depth(&self) -> f64 {
        self.bounds.depth
    }

    pub fn volume(&self) -> f64 {
        self.bounds.volume()
    }

    pub fn is_degenerate(&self) -> bool {
        self.bounds.is_degenerate()
    }

    /// An orientation `(ow, od, oh)` fits iff each dimension fits within
    /// tolerance (distilled spec §4.2).
    pub fn fits(&self, orient: (f64, f64, f64)) -> bool {
        self.bounds.fits(orient)
    }

    /// Subtract `placed` (a placed item's bounding box) from this free
    /// space, returning the residual decomposed into up to six
    /// axis-aligned slabs (distilled spec §4.3). Slabs are deliberately
    /// biased: x-slabs span full y/z, y-slabs span full z — this favours
    /// long thin z-slabs, which empirically packs better under the fill
    /// order in `Container::place_item`.
    pub fn trim(&self, placed: &Aabb) -> Vec<FreeSpace> {
        if !self.bounds.overlaps(placed) {
            return vec![self.clone()];
        }

        let (fx1, fy1, fz1, fx2, fy2, fz2) = self.bounds.bounds();
        let (px1, py1, pz1, px2, py2, pz2) = placed.bounds();

        let mut slabs = Vec::with_capacity(6);

        // Left
        if px1 > fx1 + TOL {
            slabs.push(FreeSpace::new(fx1, fy1, fz1, px1 - fx1, fy2 - fy1, fz2 - fz1));
        }
        // Right
        if px2 < fx2 - TOL {
            slabs.push(FreeSpace::new(px2, fy1, fz1, fx2 - px2, fy2 - fy1, fz2 - fz1));
        }

        let x_lo = fx1.max(px1);
        let x_hi = fx2.min(px2);

        // Bottom
        if py1 > fy1 + TOL {
            slabs.push(FreeSpace::new(x_lo, fy1, fz1, x_hi - x_lo, py1 - fy1, fz2 - fz1));
        }
        // Top
        if py2 < fy2 - TOL {
            slabs.push(FreeSpace::new(x_lo, py2, fz1, x_hi - x_lo, fy2 - py2, fz2 - fz1));
        }

        let y_lo = fy1.max(py1);
        let y_hi = fy2.min(py2);

        // Back
        if pz1 > fz1 + TOL {
            slabs.push(FreeSpace::new(x_lo, y_lo, fz1, x_hi - x_lo, y_hi - y_lo, pz1 - fz1));
        }
        // Front
        if pz2 < fz2 - TOL {
            slabs.push(FreeSpace::new(x_lo, y_lo, pz2, x_hi - x_lo, y_hi - y_lo, fz2 - pz2));
        }

        slabs
            .into_iter()
            .filter(|s| !s.is_degenerate())
            .map(|s| s.with_source(self.source.clone().unwrap_or_else(|| "trim".to_string())))
            .collect()
    }
}

/// Merge two free spaces into one when they share a face and agree on
/// the other two axes within tolerance (distilled spec §4.2). Order of
/// arguments is irrelevant; the result's origin is whichever of the two
/// is "first" along the merged axis.
pub fn try_merge(a: &FreeSpace, b: &FreeSpace) -> Option<FreeSpace> {
    // Along x: same y, z, height, depth.
    if approx_equal(a.y(), b.y())
        && approx_equal(a.z(), b.z())
        && approx_equal(a.height(), b.height())
        && approx_equal(a.depth(), b.depth())
    {
        if approx_equal(a.x() + a.width(), b.x()) {
            return Some(FreeSpace::new(
                a.x(),
                a.y(),
                a.z(),
                a.width() + b.width(),
                a.height(),
                a.depth(),
            ));
        }
        if approx_equal(b.x() + b.width(), a.x()) {
            return Some(FreeSpace::new(
                b.x(),
                b.y(),
                b.z(),
                b.width() + a.width(),
                b.height(),
                b.depth(),
            ));
        }
    }

    // Along y: same x, z, width, depth.
    if approx_equal(a.x(), b.x())
        && approx_equal(a.z(), b.z())
        && approx_equal(a.width(), b.width())
        && approx_equal(a.depth(), b.depth())
    {
        if approx_equal(a.y() + a.height(), b.y()) {
            return Some(FreeSpace::new(
                a.x(),
                a.y(),
                a.z(),
                a.width(),
                a.height() + b.height(),
                a.depth(),
            ));
        }
        if approx_equal(b.y() + b.height(), a.y()) {
            return Some(FreeSpace::new(
                b.x(),
                b.y(),
                b.z(),
                b.width(),
                b.height() + a.height(),
                b.depth(),
            ));
        }
    }

    // Along z: same x, y, width, height.
    if approx_equal(a.x(), b.x())
        && approx_equal(a.y(), b.y())
        && approx_equal(a.width(), b.width())
        && approx_equal(a.height(), b.height())
    {
        if approx_equal(a.z() + a.depth(), b.z()) {
            return Some(FreeSpace::new(
                a.x(),
                a.y(),
                a.z(),
                a.width(),
                a.height(),
                a.depth() + b.depth(),
            ));
        }
        if approx_equal(b.z() + b.depth(), a.z()) {
            return Some(FreeSpace::new(
                b.x(),
                b.y(),
                b.z(),
                b.width(),
                b.height(),
                b.depth() + a.depth(),
            ));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_outside_box_is_noop() {
        let fs = FreeSpace::new(0.0, 0.0, 0.0, 100.0, 100.0, 100.0);
        let placed = Aabb::new(200.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let trimmed = fs.trim(&placed);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].bounds, fs.bounds);
    }

    #[test]
    fn trim_corner_cube_yields_three_slabs() {
        let fs = FreeSpace::new(0.0, 0.0, 0.0, 100.0, 100.0, 100.0);
        let placed = Aabb::new(0.0, 0.0, 0.0, 50.0, 50.0, 50.0);
        let trimmed = fs.trim(&placed);
        // left/right x-slabs collapse to one (placed touches x=0), same
        // for y; only right-x, top-y, front-z survive plus nothing
        // degenerate — scheme produces exactly the 3 slabs from §8
        // scenario 1.
        let total: f64 = trimmed.iter().map(|s| s.volume()).sum();
        assert!((total - (100.0f64.powi(3) - 50.0f64.powi(3))).abs() < 1e-6);
    }

    #[test]
    fn merge_along_x() {
        let a = FreeSpace::new(0.0, 0.0, 0.0, 50.0, 100.0, 100.0);
        let b = FreeSpace::new(50.0, 0.0, 0.0, 50.0, 100.0, 100.0);
        let merged = try_merge(&a, &b).expect("should merge");
        assert_eq!(merged.width(), 100.0);
    }

    #[test]
    fn merge_rejects_mismatched_faces() {
        let a = FreeSpace::new(0.0, 0.0, 0.0, 50.0, 100.0, 100.0);
        let b = FreeSpace::new(50.0, 0.0, 0.0, 50.0, 90.0, 100.0);
        assert!(try_merge(&a, &b).is_none());
    }
}
