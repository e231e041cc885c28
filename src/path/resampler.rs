//! The curve-agnostic path resampler.
//!
//! Pattern tools keep a path at "effectively infinite" density and locally
//! re-subdivide index ranges as they deform it. The resampler owns a
//! [`PathPoint`] list with monotonically increasing cumulative length and
//! an explicitly tracked point count, and can insert interpolated points
//! into any index range without recomputing the untouched remainder.

use super::{PathPoint, build_path_points};
use crate::geometry::Vec2;

/// A resamplable point list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResampler {
    points: Vec<PathPoint>,
    /// Tracked explicitly; must always equal `points.len()`.
    count: usize,
}

impl PathResampler {
    /// Wraps an already evaluated point list.
    #[must_use]
    pub fn new(points: Vec<PathPoint>) -> Self {
        let count = points.len();
        Self { points, count }
    }

    /// Builds the point list (tangents, lengths) over raw positions.
    #[must_use]
    pub fn from_positions(positions: &[Vec2]) -> Self {
        Self::new(build_path_points(positions))
    }

    /// The current point list.
    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// The tracked point count.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total arc length of the list.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.points
            .last()
            .map_or(0.0, |point| point.cumulative_length)
    }

    /// The index whose cumulative length is closest to `length`, found by
    /// monotonic binary search.
    #[must_use]
    pub fn find_index_near_length(&self, length: f64) -> usize {
        if self.points.len() < 2 {
            return 0;
        }
        let upper = self
            .points
            .partition_point(|point| point.cumulative_length < length)
            .min(self.points.len() - 1);
        if upper == 0 {
            return 0;
        }
        let below = &self.points[upper - 1];
        let above = &self.points[upper];
        if length - below.cumulative_length <= above.cumulative_length - length {
            upper - 1
        } else {
            upper
        }
    }

    /// Inserts interpolated points between `start` and `end` (inclusive,
    /// `end >= start`) so the range holds approximately `target_count`
    /// roughly equally spaced points. Existing points are invariant
    /// anchors; cumulative lengths are extended incrementally and the
    /// points outside the range are untouched (inserting on a straight
    /// polyline changes no distance, so their bookkeeping stays valid).
    ///
    /// # Panics
    ///
    /// Panics when the range is inverted or runs past the end of the list.
    pub fn subdivide(&mut self, start: usize, end: usize, target_count: usize) {
        assert!(start <= end, "inverted range {start}..={end}");
        assert!(end < self.points.len(), "range {start}..={end} out of bounds");
        if end - start < 1 || target_count <= end - start + 1 {
            return;
        }
        let range_length =
            self.points[end].cumulative_length - self.points[start].cumulative_length;
        if range_length <= f64::EPSILON {
            return;
        }
        let spacing = range_length / (target_count - 1) as f64;

        let mut resampled: Vec<PathPoint> = Vec::with_capacity(target_count);
        // When a gap gets split, the following anchor's incoming segment
        // shrinks to one piece; its cumulative length is unchanged.
        let mut incoming: Option<f64> = None;
        for gap in start..end {
            let mut anchor = self.points[gap];
            if let Some(piece) = incoming.take() {
                anchor.segment_length = piece;
            }
            resampled.push(anchor);
            let next = self.points[gap + 1];
            let gap_length = next.segment_length;
            let inserts = (gap_length / spacing).round() as usize;
            if inserts < 2 {
                continue;
            }
            let direction = (next.position - anchor.position)
                .normalized()
                .unwrap_or(anchor.direction);
            let piece = gap_length / inserts as f64;
            for step in 1..inserts {
                let fraction = step as f64 / inserts as f64;
                resampled.push(PathPoint {
                    position: anchor.position.lerp(next.position, fraction),
                    direction,
                    segment_length: piece,
                    cumulative_length: anchor.cumulative_length + gap_length * fraction,
                });
            }
            incoming = Some(piece);
        }
        let mut tail_anchor = self.points[end];
        if let Some(piece) = incoming.take() {
            tail_anchor.segment_length = piece;
        }
        resampled.push(tail_anchor);

        let inserted = resampled.len() - (end - start + 1);
        self.points.splice(start..=end, resampled);
        self.count += inserted;
        debug_assert_eq!(self.count, self.points.len());
    }
}
