//! Box overlap scoring.
//!
//! All functions are total: degenerate or disjoint boxes score zero rather
//! than producing NaN.

use smartlocate_protocols::BoundingBox;

/// Area of the intersection of two boxes, zero when they do not overlap.
pub fn overlap_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let dx = a.right().min(b.right()) - a.x.max(b.x);
    let dy = a.bottom().min(b.bottom()) - a.y.max(b.y);
    if dx >= 0.0 && dy >= 0.0 { dx * dy } else { 0.0 }
}

/// Intersection over union, in `[0, 1]`.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let overlap = overlap_area(a, b);
    let union = a.area() + b.area() - overlap;
    if union > 0.0 { overlap / union } else { 0.0 }
}

/// Whether the center of `inner` lies strictly inside `outer`.
///
/// A center on the boundary does not count.
pub fn center_contained(inner: &BoundingBox, outer: &BoundingBox) -> bool {
    let center = inner.center();
    center.x > outer.x
        && center.x < outer.right()
        && center.y > outer.y
        && center.y < outer.bottom()
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
