//! The slider path geometry engine.
//!
//! A [`SliderPath`] evaluates a curve family over its control points into a
//! dense polyline of [`PathPoint`]s carrying unit tangents and arc-length
//! bookkeeping, honoring the authoritative expected-length override. The
//! engine is pure: a path is computed once at construction and never
//! mutated; editing tools build a new path when control points change.
//!
//! Compound curves (Bezier and Catmull-Rom chains) split into independent
//! segments at duplicated control points; [`SliderPath::segment_starts`]
//! marks those discontinuities in the evaluated point list.

mod arc;
pub mod bezier;
pub mod catmull;
pub mod resampler;

use crate::geometry::Vec2;

/// The curve family of a slider path, stored in the file as a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveType {
    /// `L` — piecewise straight segments.
    Linear,
    /// `P` — a circular arc through exactly three points.
    PerfectCircle,
    /// `B` — one or more concatenated Bezier segments.
    Bezier,
    /// `C` — a centripetal Catmull-Rom chain.
    CatmullRom,
}

impl CurveType {
    /// Reads a curve type from its file letter.
    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "L" => Some(Self::Linear),
            "P" => Some(Self::PerfectCircle),
            "B" => Some(Self::Bezier),
            "C" => Some(Self::CatmullRom),
            _ => None,
        }
    }

    /// The letter this curve type is stored as.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Linear => 'L',
            Self::PerfectCircle => 'P',
            Self::Bezier => 'B',
            Self::CatmullRom => 'C',
        }
    }
}

/// One evaluated point of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// Position on the playfield.
    pub position: Vec2,
    /// Unit tangent at this point.
    pub direction: Vec2,
    /// Distance from the previous point (`0` for the first).
    pub segment_length: f64,
    /// Arc length from the path start to this point.
    pub cumulative_length: f64,
}

/// An evaluated slider path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderPath {
    curve_type: CurveType,
    control_points: Vec<Vec2>,
    expected_length: Option<f64>,
    points: Vec<PathPoint>,
    segment_starts: Vec<usize>,
}

impl SliderPath {
    /// Evaluates the path of `curve_type` over `control_points`.
    ///
    /// When `expected_length` is given it is authoritative: the evaluated
    /// polyline is truncated, or its final segment linearly extrapolated,
    /// so the total arc length matches it exactly.
    #[must_use]
    pub fn new(
        curve_type: CurveType,
        control_points: Vec<Vec2>,
        expected_length: Option<f64>,
    ) -> Self {
        let (mut vertices, mut segment_starts) = evaluate(curve_type, &control_points);
        if let Some(expected) = expected_length {
            fit_to_length(&mut vertices, expected);
            segment_starts.retain(|&start| start < vertices.len());
        }
        Self {
            curve_type,
            control_points,
            expected_length,
            points: build_path_points(&vertices),
            segment_starts,
        }
    }

    /// The curve family this path was evaluated from.
    #[must_use]
    pub const fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// The control points this path was evaluated from.
    #[must_use]
    pub fn control_points(&self) -> &[Vec2] {
        &self.control_points
    }

    /// The expected-length override, if any.
    #[must_use]
    pub const fn expected_length(&self) -> Option<f64> {
        self.expected_length
    }

    /// The evaluated points with their arc-length bookkeeping.
    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Indices into [`SliderPath::points`] where independently-curved
    /// pieces begin.
    #[must_use]
    pub fn segment_starts(&self) -> &[usize] {
        &self.segment_starts
    }

    /// Total arc length of the path.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.points
            .last()
            .map_or(0.0, |point| point.cumulative_length)
    }

    /// Inverts arc length to the continuous point-list parameter `t` in
    /// `[0, len - 1]`: a monotonic binary search over the cumulative
    /// lengths followed by linear interpolation inside the bracketing
    /// segment. Segments shorter than `tolerance` snap to their end index,
    /// which keeps the result deterministic near duplicated points.
    #[must_use]
    pub fn length_to_t(&self, length: f64, tolerance: f64) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let length = length.clamp(0.0, self.total_length());
        let index = self
            .points
            .partition_point(|point| point.cumulative_length < length);
        if index == 0 {
            return 0.0;
        }
        let bracket = &self.points[index];
        if bracket.segment_length <= tolerance {
            return index as f64;
        }
        let overshoot = bracket.cumulative_length - length;
        index as f64 - overshoot / bracket.segment_length
    }

    /// Arc length at the continuous parameter `t`, the inverse of
    /// [`SliderPath::length_to_t`].
    #[must_use]
    pub fn length_at(&self, t: f64) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let t = t.clamp(0.0, (self.points.len() - 1) as f64);
        let index = (t.floor() as usize).min(self.points.len() - 2);
        let fraction = t - index as f64;
        let here = &self.points[index];
        here.cumulative_length + self.points[index + 1].segment_length * fraction
    }

    /// Position at the continuous parameter `t`.
    #[must_use]
    pub fn position_at(&self, t: f64) -> Vec2 {
        let Some(last) = self.points.last() else {
            return Vec2::ZERO;
        };
        if self.points.len() == 1 {
            return last.position;
        }
        let t = t.clamp(0.0, (self.points.len() - 1) as f64);
        let index = (t.floor() as usize).min(self.points.len() - 2);
        let fraction = t - index as f64;
        self.points[index]
            .position
            .lerp(self.points[index + 1].position, fraction)
    }

    /// Position at the given arc length from the start.
    #[must_use]
    pub fn position_at_length(&self, length: f64) -> Vec2 {
        self.position_at(self.length_to_t(length, 0.0))
    }

    /// Unit tangent at the given arc length from the start.
    #[must_use]
    pub fn direction_at_length(&self, length: f64) -> Vec2 {
        if self.points.is_empty() {
            return Vec2::new(1.0, 0.0);
        }
        let t = self.length_to_t(length, 0.0);
        let index = (t.round() as usize).min(self.points.len() - 1);
        self.points[index].direction
    }
}

/// Evaluates the raw polyline of a curve family, returning the vertices
/// and the indices where independent segments start.
fn evaluate(curve_type: CurveType, control_points: &[Vec2]) -> (Vec<Vec2>, Vec<usize>) {
    if control_points.is_empty() {
        return (Vec::new(), Vec::new());
    }
    // The perfect-circle family only exists for exactly three points; the
    // format treats anything else under `P` as a Bezier chain. A collinear
    // triple has no circumcircle and degrades to the linear family.
    if curve_type == CurveType::PerfectCircle && control_points.len() == 3 {
        match arc::arc_points(control_points[0], control_points[1], control_points[2]) {
            Ok(vertices) => return (vertices, vec![0]),
            Err(arc::Degenerate) => {
                return (control_points.to_vec(), vec![0]);
            }
        }
    }

    let mut vertices: Vec<Vec2> = Vec::new();
    let mut segment_starts = Vec::new();
    for segment in split_at_duplicates(control_points) {
        let piece = match curve_type {
            CurveType::Linear => segment.to_vec(),
            CurveType::PerfectCircle | CurveType::Bezier => bezier::flatten(segment),
            CurveType::CatmullRom => catmull::centripetal_points(segment),
        };
        let start = match vertices.last() {
            Some(&last) if piece.first() == Some(&last) => vertices.len() - 1,
            _ => vertices.len(),
        };
        segment_starts.push(start);
        for vertex in piece {
            if vertices.last() != Some(&vertex) {
                vertices.push(vertex);
            }
        }
    }
    (vertices, segment_starts)
}

/// Splits a control point list at consecutive duplicates, the format's
/// marker for segment boundaries in compound curves.
fn split_at_duplicates(points: &[Vec2]) -> Vec<&[Vec2]> {
    let mut segments = Vec::new();
    let mut begin = 0;
    for i in 1..points.len() {
        if points[i] == points[i - 1] {
            segments.push(&points[begin..i]);
            begin = i;
        }
    }
    segments.push(&points[begin..]);
    segments
}

/// Truncates the polyline, or linearly extrapolates its final segment, so
/// its total length equals `expected` exactly.
fn fit_to_length(vertices: &mut Vec<Vec2>, expected: f64) {
    if vertices.is_empty() || expected <= 0.0 {
        return;
    }
    let mut travelled = 0.0;
    for i in 1..vertices.len() {
        let step = vertices[i].distance(vertices[i - 1]);
        if travelled + step >= expected {
            let direction = vertices[i] - vertices[i - 1];
            let fraction = (expected - travelled) / step;
            vertices[i] = vertices[i - 1] + direction * fraction;
            vertices.truncate(i + 1);
            return;
        }
        travelled += step;
    }
    // Natural length falls short: push the end out along the last segment.
    let last = vertices[vertices.len() - 1];
    let direction = if vertices.len() >= 2 {
        (last - vertices[vertices.len() - 2])
            .normalized()
            .unwrap_or(Vec2::new(1.0, 0.0))
    } else {
        Vec2::new(1.0, 0.0)
    };
    vertices.push(last + direction * (expected - travelled));
}

/// Builds the bookkeeping point list over a polyline: unit tangents,
/// per-segment distances and cumulative arc length.
pub(crate) fn build_path_points(vertices: &[Vec2]) -> Vec<PathPoint> {
    let mut points = Vec::with_capacity(vertices.len());
    let mut cumulative = 0.0;
    let mut previous_direction = Vec2::new(1.0, 0.0);
    for (i, &position) in vertices.iter().enumerate() {
        let segment_length = if i == 0 {
            0.0
        } else {
            position.distance(vertices[i - 1])
        };
        cumulative += segment_length;
        let direction = vertices
            .get(i + 1)
            .and_then(|&next| (next - position).normalized())
            .unwrap_or(previous_direction);
        previous_direction = direction;
        points.push(PathPoint {
            position,
            direction,
            segment_length,
            cumulative_length: cumulative,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_path(expected: Option<f64>) -> SliderPath {
        SliderPath::new(
            CurveType::Linear,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 50.0),
            ],
            expected,
        )
    }

    #[test]
    fn linear_lengths_accumulate() {
        let path = linear_path(None);
        assert_eq!(path.total_length(), 150.0);
        assert_eq!(path.points().len(), 3);
        assert_eq!(path.points()[1].direction, Vec2::new(0.0, 1.0));
        assert_eq!(path.segment_starts(), &[0]);
    }

    #[test]
    fn expected_length_truncates_exactly() {
        let path = linear_path(Some(120.0));
        assert_eq!(path.total_length(), 120.0);
        assert_eq!(
            path.points().last().map(|p| p.position),
            Some(Vec2::new(100.0, 20.0))
        );
    }

    #[test]
    fn expected_length_extrapolates_exactly() {
        let path = linear_path(Some(200.0));
        assert_eq!(path.total_length(), 200.0);
        assert_eq!(
            path.points().last().map(|p| p.position),
            Some(Vec2::new(100.0, 100.0))
        );
    }

    #[test]
    fn length_to_t_bounds_and_monotonicity() {
        let path = linear_path(None);
        let total = path.total_length();
        assert_eq!(path.length_to_t(0.0, 1e-6), 0.0);
        assert_eq!(
            path.length_to_t(total, 1e-6),
            (path.points().len() - 1) as f64
        );
        let mut previous = 0.0;
        for i in 0..=30 {
            let t = path.length_to_t(total * f64::from(i) / 30.0, 1e-6);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn length_inversion_within_tolerance() {
        let path = linear_path(None);
        for length in [0.0, 10.0, 99.9, 100.0, 130.0, 150.0] {
            let t = path.length_to_t(length, 1e-6);
            assert!((path.length_at(t) - length).abs() <= 1e-6);
        }
    }

    #[test]
    fn collinear_perfect_circle_falls_back_to_linear() {
        let path = SliderPath::new(
            CurveType::PerfectCircle,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(50.0, 0.0),
                Vec2::new(100.0, 0.0),
            ],
            None,
        );
        assert_eq!(path.points().len(), 3);
        assert!((path.total_length() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_circle_with_wrong_arity_uses_bezier() {
        let path = SliderPath::new(
            CurveType::PerfectCircle,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(50.0, 50.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(150.0, -50.0),
            ],
            None,
        );
        assert!(path.total_length() > 0.0);
    }

    #[test]
    fn duplicate_control_points_split_segments() {
        let path = SliderPath::new(
            CurveType::Bezier,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
            ],
            None,
        );
        assert_eq!(path.segment_starts().len(), 2);
        assert!((path.total_length() - 200.0).abs() < 1e-6);
        let boundary = path.segment_starts()[1];
        assert_eq!(path.points()[boundary].position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn position_at_length_walks_the_polyline() {
        let path = linear_path(None);
        assert_eq!(path.position_at_length(50.0), Vec2::new(50.0, 0.0));
        assert_eq!(path.position_at_length(125.0), Vec2::new(100.0, 25.0));
        assert_eq!(path.position_at_length(1e9), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn empty_and_single_point_paths_are_harmless() {
        let empty = SliderPath::new(CurveType::Bezier, Vec::new(), Some(100.0));
        assert_eq!(empty.total_length(), 0.0);
        assert_eq!(empty.position_at_length(10.0), Vec2::ZERO);

        let single = SliderPath::new(CurveType::Linear, vec![Vec2::new(5.0, 5.0)], None);
        assert_eq!(single.position_at_length(10.0), Vec2::new(5.0, 5.0));
    }
}
