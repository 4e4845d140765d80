//! Greedy stitching of world-space segments into continuous paths
//!
//! Segments are grouped by stroke style and, inside each group, chained
//! whenever two endpoints lie within the tolerance. A path grows from both
//! ends until nothing else fits. Among the joins that fit, one crossing into
//! a different grid cell always beats one staying inside the same cell, and
//! shorter gaps break ties within a tier. This keeps a path from folding
//! back into a sibling arc of its own tile when it could continue into the
//! neighbouring tile.
//!
//! Each extension step rescans every unused segment of the group, so the
//! worst case is quadratic in the group size per extension. Large grids with
//! a single style are where this shows up.

use crate::algorithm::extraction::{Segment, SegmentKind};
use crate::math::geometry::{Point, distance_squared};
use crate::spatial::grid::CellCoord;
use crate::spatial::tiles::{Color, StyleKey};
use bitvec::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Stroke parameters carried by a stitched path
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    /// Foreground stroke colour
    pub primary_color: Color,
    /// Foreground stroke weight
    pub primary_weight: f64,
    /// Background stroke colour
    pub secondary_color: Color,
    /// Extra width of the background stroke around the foreground stroke
    pub secondary_width: f64,
    /// Full width of the background stroke, `primary_weight + secondary_width`
    pub secondary_total_weight: f64,
}

impl From<&StyleKey> for PathStyle {
    fn from(key: &StyleKey) -> Self {
        Self {
            primary_color: key.primary_color.clone(),
            primary_weight: key.primary_weight,
            secondary_color: key.secondary_color.clone(),
            secondary_width: key.secondary_width,
            secondary_total_weight: key.secondary_total_weight(),
        }
    }
}

/// A chain of one or more segments sharing a stroke style
#[derive(Debug, Clone, PartialEq)]
pub struct StitchedPath {
    /// `Bezier` once any curve has been absorbed
    pub kind: SegmentKind,
    /// Control points; `4 + 3k` points describe `1 + k` chained cubic arcs
    pub points: Vec<Point>,
    /// Stroke parameters shared by every absorbed segment
    pub style: PathStyle,
    /// Origin cell of the segment at the start of the path
    pub first_origin: CellCoord,
    /// Origin cell of the segment at the end of the path
    pub last_origin: CellCoord,
    /// Number of segments chained into this path
    pub segment_count: usize,
    /// Ends meet within the stitching tolerance after chaining several segments
    ///
    /// Informational only; markup is emitted the same way for loops and
    /// open chains.
    pub closed: bool,
}

impl StitchedPath {
    /// The `(control1, control2, end)` triples after the starting point
    ///
    /// Trailing points that do not complete a triple are ignored.
    pub fn cubic_arcs(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.points
            .get(1..)
            .unwrap_or(&[])
            .chunks_exact(3)
            .filter_map(|chunk| <[Point; 3]>::try_from(chunk).ok())
    }

    /// A curve path without enough points for a single cubic arc
    pub fn is_degenerate(&self) -> bool {
        self.kind == SegmentKind::Bezier && self.points.len() < 4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    /// Path end meets candidate start
    Append,
    /// Path end meets candidate end
    AppendReversed,
    /// Path start meets candidate end
    Prepend,
    /// Path start meets candidate start
    PrependReversed,
}

#[derive(Debug, Clone, Copy)]
struct Match {
    index: usize,
    join: Join,
    crosses_cell: bool,
    gap: f64,
}

impl Match {
    /// Joins into another cell rank above every join inside the same cell,
    /// whatever the gap; within a tier the shorter gap ranks higher
    fn outranks(&self, other: &Self) -> bool {
        self.crosses_cell
            .cmp(&other.crosses_cell)
            .then_with(|| other.gap.total_cmp(&self.gap))
            == Ordering::Greater
    }
}

struct PathBuilder {
    kind: SegmentKind,
    points: Vec<Point>,
    first_origin: CellCoord,
    last_origin: CellCoord,
    segment_count: usize,
}

impl PathBuilder {
    fn seed(segment: &Segment) -> Self {
        Self {
            kind: segment.kind,
            points: segment.points.clone(),
            first_origin: segment.origin,
            last_origin: segment.origin,
            segment_count: 1,
        }
    }

    // Splices the candidate onto one end, dropping the endpoint it shares
    fn absorb(&mut self, candidate: &Segment, join: Join) {
        if self.kind == SegmentKind::Point && candidate.kind != SegmentKind::Point {
            self.kind = candidate.kind;
        }

        let shared = candidate.points.len().saturating_sub(1);
        match join {
            Join::Append => {
                self.points.extend(candidate.points.iter().skip(1));
                self.last_origin = candidate.origin;
            }
            Join::AppendReversed => {
                self.points.extend(candidate.points.iter().rev().skip(1));
                self.last_origin = candidate.origin;
            }
            Join::Prepend => {
                let prefix = candidate.points.iter().take(shared).copied().collect();
                self.prepend(prefix);
                self.first_origin = candidate.origin;
            }
            Join::PrependReversed => {
                let prefix = candidate.points.iter().rev().take(shared).copied().collect();
                self.prepend(prefix);
                self.first_origin = candidate.origin;
            }
        }
        self.segment_count += 1;
    }

    fn prepend(&mut self, mut prefix: Vec<Point>) {
        prefix.append(&mut self.points);
        self.points = prefix;
    }

    fn finish(self, style: &StyleKey, tolerance_squared: f64) -> StitchedPath {
        let closed = self.segment_count > 1
            && self.points.len() > 1
            && match (self.points.first(), self.points.last()) {
                (Some(&first), Some(&last)) => distance_squared(first, last) <= tolerance_squared,
                _ => false,
            };

        StitchedPath {
            kind: self.kind,
            points: self.points,
            style: PathStyle::from(style),
            first_origin: self.first_origin,
            last_origin: self.last_origin,
            segment_count: self.segment_count,
            closed,
        }
    }
}

/// Chain segments whose endpoints lie within `tolerance` of each other
///
/// Segments of different styles never share a path. The result is sorted by
/// descending background stroke width (stable, so equal widths keep group
/// order). A negative or NaN tolerance is treated as zero, which joins only
/// endpoints that coincide exactly.
pub fn stitch_segments(segments: &[Segment], tolerance: f64) -> Vec<StitchedPath> {
    let tolerance = if tolerance >= 0.0 {
        tolerance
    } else {
        log::warn!("Stitching tolerance {tolerance} is not a non-negative distance, using 0");
        0.0
    };
    let tolerance_squared = tolerance * tolerance;

    let groups = group_by_style(segments);
    let mut stitched = Vec::new();
    for group in &groups {
        stitch_group(group, tolerance_squared, &mut stitched);
    }

    stitched.sort_by(|a, b| {
        b.style
            .secondary_total_weight
            .total_cmp(&a.style.secondary_total_weight)
    });

    log::debug!(
        "Stitched {} segments in {} style groups into {} paths (tolerance {tolerance})",
        segments.len(),
        groups.len(),
        stitched.len()
    );

    stitched
}

/// Partition segments by exact style, groups in order of first appearance
fn group_by_style(segments: &[Segment]) -> Vec<Vec<&Segment>> {
    let mut index_by_style: HashMap<&StyleKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Segment>> = Vec::new();

    for segment in segments {
        if segment.points.is_empty() {
            log::warn!("Skipping segment from cell {} with no points", segment.origin);
            continue;
        }

        let next_index = groups.len();
        let group_index = *index_by_style.entry(&segment.style).or_insert(next_index);
        if group_index == next_index {
            groups.push(Vec::new());
        }
        if let Some(group) = groups.get_mut(group_index) {
            group.push(segment);
        }
    }

    groups
}

fn stitch_group(group: &[&Segment], tolerance_squared: f64, stitched: &mut Vec<StitchedPath>) {
    let mut used = bitvec![0; group.len()];

    for (seed_index, &seed) in group.iter().enumerate() {
        if is_used(&used, seed_index) {
            continue;
        }
        used.set(seed_index, true);

        let mut path = PathBuilder::seed(seed);
        while let Some(found) = best_match(&path, group, &used, tolerance_squared) {
            used.set(found.index, true);
            if let Some(&candidate) = group.get(found.index) {
                path.absorb(candidate, found.join);
            }
        }

        stitched.push(path.finish(&seed.style, tolerance_squared));
    }
}

fn is_used(used: &BitVec, index: usize) -> bool {
    used.get(index).as_deref() == Some(&true)
}

/// Highest scoring join between either end of the path and an unused segment
///
/// Candidates are scanned in group order and joins in `Join` order; a later
/// option replaces the current best only when it strictly outranks it.
fn best_match(
    path: &PathBuilder,
    group: &[&Segment],
    used: &BitVec,
    tolerance_squared: f64,
) -> Option<Match> {
    let (Some(&path_start), Some(&path_end)) = (path.points.first(), path.points.last()) else {
        return None;
    };

    let mut best: Option<Match> = None;

    for (index, candidate) in group.iter().enumerate() {
        if is_used(used, index) {
            continue;
        }
        let (Some(candidate_start), Some(candidate_end)) = (candidate.start(), candidate.end())
        else {
            continue;
        };

        let options = [
            (Join::Append, path_end, candidate_start, path.last_origin),
            (Join::AppendReversed, path_end, candidate_end, path.last_origin),
            (Join::Prepend, path_start, candidate_end, path.first_origin),
            (Join::PrependReversed, path_start, candidate_start, path.first_origin),
        ];

        for (join, path_point, candidate_point, path_origin) in options {
            let gap = distance_squared(path_point, candidate_point);
            let within_tolerance = gap <= tolerance_squared;
            if !within_tolerance {
                continue;
            }

            let found = Match {
                index,
                join,
                crosses_cell: candidate.origin != path_origin,
                gap,
            };
            if best.is_none_or(|current| found.outranks(&current)) {
                best = Some(found);
            }
        }
    }

    best
}
