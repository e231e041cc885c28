//! Circular arc evaluation through three control points.

use crate::geometry::{Vec2, circumcircle_center};

/// The three points admit no unique circumcircle. Handled locally by the
/// caller with a linear fallback, never surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Degenerate;

/// Samples the circular arc that starts at `a`, passes through `b` and
/// ends at `c`. The sample density scales with the swept angle.
pub(crate) fn arc_points(a: Vec2, b: Vec2, c: Vec2) -> Result<Vec<Vec2>, Degenerate> {
    let center = circumcircle_center(a, b, c).ok_or(Degenerate)?;
    let radius = (a - center).length();

    let start_angle = (a - center).y.atan2((a - center).x);
    let mut through_angle = angle_from(a - center, b - center);
    let mut end_angle = angle_from(a - center, c - center);
    if through_angle < 0.0 {
        through_angle += std::f64::consts::TAU;
    }
    if end_angle < 0.0 {
        end_angle += std::f64::consts::TAU;
    }
    // The arc must pass through `b`; when `b` lies beyond `c` going
    // counterclockwise, the short way around is clockwise.
    if end_angle < through_angle {
        end_angle -= std::f64::consts::TAU;
    }

    let samples = ((end_angle.abs() * 100.0 / std::f64::consts::TAU).ceil() as usize).clamp(10, 200);
    let mut points = Vec::with_capacity(samples + 2);
    points.push(a);
    for i in 1..=samples {
        let t = i as f64 / (samples + 1) as f64;
        let angle = start_angle + t * end_angle;
        points.push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
    }
    points.push(c);
    Ok(points)
}

/// Signed angle from `from` to `to`.
fn angle_from(from: Vec2, to: Vec2) -> f64 {
    from.cross(to).atan2(from.dot(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicircle_stays_on_the_circle() {
        let points = arc_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(100.0, 0.0),
        )
        .expect("not degenerate");
        let center = Vec2::new(50.0, 0.0);
        for point in &points {
            assert!(((*point - center).length() - 50.0).abs() < 1e-6);
        }
        assert_eq!(points.first(), Some(&Vec2::new(0.0, 0.0)));
        assert_eq!(points.last(), Some(&Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn arc_length_approaches_analytic() {
        let points = arc_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(100.0, 0.0),
        )
        .expect("not degenerate");
        let length: f64 = points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum();
        let analytic = std::f64::consts::PI * 50.0;
        assert!((length - analytic).abs() < 1.0, "length {length}");
    }

    #[test]
    fn direction_follows_the_middle_point() {
        // Same endpoints, mirrored middle point: the arcs bow to opposite
        // sides of the chord.
        let up = arc_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(100.0, 0.0),
        )
        .expect("not degenerate");
        let down = arc_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, -50.0),
            Vec2::new(100.0, 0.0),
        )
        .expect("not degenerate");
        assert!(up[up.len() / 2].y > 0.0);
        assert!(down[down.len() / 2].y < 0.0);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        assert_eq!(
            arc_points(
                Vec2::new(0.0, 0.0),
                Vec2::new(50.0, 0.0),
                Vec2::new(100.0, 0.0),
            ),
            Err(Degenerate)
        );
    }
}
