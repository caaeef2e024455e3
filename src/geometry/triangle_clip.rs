use super::{Axis, FloatType, Triangle, WorldBox, WorldPoint};

/// Splits a fragment of a triangle by an axis aligned plane at `position`.
///
/// Returns bounding boxes of the parts of the triangle below and above the plane,
/// both intersected with `fragment_bounds`. Either of the boxes may be empty if the part of
/// the triangle inside the fragment does not reach to that side of the plane.
/// The result is conservative: union of the two boxes always covers the part of the triangle
/// inside `fragment_bounds`.
pub fn clip_triangle(
    triangle: &Triangle<WorldPoint>,
    fragment_bounds: &WorldBox,
    axis: Axis,
    position: FloatType,
) -> (WorldBox, WorldBox) {
    let dim = axis.index();
    let mut left = WorldBox::empty();
    let mut right = WorldBox::empty();

    // Walk all edges, each vertex is visited once as the start of an edge
    for i in 0..3 {
        let v0 = &triangle[i];
        let v1 = &triangle[(i + 1) % 3];
        let v0d = v0[dim];
        let v1d = v1[dim];

        if v0d <= position {
            left.extend_point(v0);
        }
        if v0d >= position {
            right.extend_point(v0);
        }

        if (v0d < position && position < v1d) || (v1d < position && position < v0d) {
            debug_assert!(v1d - v0d != 0.0);
            let t = (position - v0d) / (v1d - v0d);
            let mut crossing = v0 + (v1 - v0) * t;
            // Interpolation may be off by an ulp, the crossing is on the plane by construction
            crossing[dim] = position;
            left.extend_point(&crossing);
            right.extend_point(&crossing);
        }
    }

    (
        intersection(&left, fragment_bounds),
        intersection(&right, fragment_bounds),
    )
}

/// Part of a box inside bounds, `WorldBox::empty()` if they don't overlap.
fn intersection(b: &WorldBox, bounds: &WorldBox) -> WorldBox {
    let ret = WorldBox::new(b.min.sup(&bounds.min), b.max.inf(&bounds.max));
    if ret.is_empty() {
        WorldBox::empty()
    } else {
        ret
    }
}
