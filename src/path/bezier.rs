//! Adaptive Bezier flattening by recursive de Casteljau subdivision.
//!
//! A segment subdivides at its parametric midpoint until every second
//! difference of its control polygon falls under the flatness tolerance.
//! Recursion depth is bounded explicitly so evaluation terminates for any
//! control point configuration, including near-duplicate points and
//! extreme curvature.

use crate::geometry::Vec2;

/// Maximum deviation of a control polygon from its chord before further
/// subdivision is required.
const FLATNESS_TOLERANCE: f64 = 0.25;

/// Hard bound on subdivision depth: at most 2^16 pieces per segment, far
/// beyond what the flatness test asks for on any real curve. The bound
/// guarantees termination for adversarial inputs (non-finite coordinates,
/// near-duplicate points) where the flatness test can never pass.
const MAX_RECURSION_DEPTH: usize = 16;

/// Flattens one Bezier segment of arbitrary degree into a polyline that
/// starts and ends exactly on the outer control points.
#[must_use]
pub fn flatten(control: &[Vec2]) -> Vec<Vec2> {
    let Some(&first) = control.first() else {
        return Vec::new();
    };
    let mut polyline = vec![first];
    if control.len() > 1 {
        flatten_into(control.to_vec(), 0, &mut polyline);
    }
    polyline
}

fn flatten_into(control: Vec<Vec2>, depth: usize, polyline: &mut Vec<Vec2>) {
    if depth >= MAX_RECURSION_DEPTH || is_flat_enough(&control) {
        // The control polygon approximates the curve within tolerance; its
        // vertices become path vertices. The first one is already emitted
        // as the tail of the previous piece.
        polyline.extend_from_slice(&control[1..]);
        return;
    }
    let (left, right) = subdivide(&control);
    flatten_into(left, depth + 1, polyline);
    flatten_into(right, depth + 1, polyline);
}

fn is_flat_enough(control: &[Vec2]) -> bool {
    control.windows(3).all(|window| {
        (window[0] - window[1] * 2.0 + window[2]).length_squared()
            <= FLATNESS_TOLERANCE * FLATNESS_TOLERANCE * 4.0
    })
}

/// One de Casteljau step at `t = 0.5`: the midpoint triangle's left edge
/// and (reversed) right edge are the control polygons of the two halves.
fn subdivide(control: &[Vec2]) -> (Vec<Vec2>, Vec<Vec2>) {
    let degree = control.len();
    let mut working = control.to_vec();
    let mut left = Vec::with_capacity(degree);
    let mut right = Vec::with_capacity(degree);
    for level in 0..degree {
        left.push(working[0]);
        right.push(working[degree - 1 - level]);
        for i in 0..degree - 1 - level {
            working[i] = working[i].lerp(working[i + 1], 0.5);
        }
    }
    right.reverse();
    (left, right)
}
