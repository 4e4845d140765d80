//! World-space segment extraction from a mosaic grid
//!
//! Every primitive of every placed tile is rotated about the tile centre,
//! shifted to its cell and tagged with its stroke style and origin cell.

use crate::io::configuration::{DESIGN_SIZE, TILE_CENTER};
use crate::math::geometry::{Point, rotate_about};
use crate::spatial::grid::{CellCoord, GridCell, MosaicGrid};
use crate::spatial::tiles::{Primitive, StyleKey, TileLibrary};

/// Geometric kind of a segment or stitched path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A single point drawn as a disc
    Point,
    /// One or more chained cubic Bézier arcs
    Bezier,
}

/// A primitive placed in world space
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Point or curve
    pub kind: SegmentKind,
    /// One point for `Point`, four control points for `Bezier`
    pub points: Vec<Point>,
    /// Stroke style of the tile the segment came from
    pub style: StyleKey,
    /// Grid cell the segment came from
    pub origin: CellCoord,
}

impl Segment {
    /// First point of the segment
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last point of the segment
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Transform from tile-local to world coordinates for one cell
#[derive(Debug, Clone, Copy)]
pub struct CellTransform {
    cos_sin: (f64, f64),
    offset: Point,
}

impl CellTransform {
    /// Transform for a cell at `coord` holding `cell`
    pub const fn new(coord: CellCoord, cell: GridCell) -> Self {
        Self {
            cos_sin: cell.rotation.cos_sin(),
            offset: Point::new(
                coord.col as f64 * DESIGN_SIZE,
                coord.row as f64 * DESIGN_SIZE,
            ),
        }
    }

    /// Rotate about the tile centre, then move into the cell
    pub fn apply(&self, point: Point) -> Point {
        let center = Point::new(TILE_CENTER, TILE_CENTER);
        rotate_about(point, center, self.cos_sin) + self.offset
    }
}

/// Walk the grid and emit every primitive as a world-space segment
///
/// Cells are visited column by column and primitives in tile order, so the
/// result is identical for identical inputs. Cells whose tile index is not in
/// `tiles` are skipped without complaint; the grid is expected to be
/// regenerated before it matters.
pub fn extract_segments(grid: &MosaicGrid, tiles: &TileLibrary) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut stale_cells = 0_usize;

    for (coord, cell) in grid.iter() {
        let Some(tile) = tiles.get(cell.tile_index) else {
            stale_cells += 1;
            continue;
        };

        let transform = CellTransform::new(coord, cell);
        let style = tile.style_key();

        for primitive in tile.primitives() {
            let kind = match primitive {
                Primitive::Point(_) => SegmentKind::Point,
                Primitive::Quad(_) | Primitive::Cubic(_) => SegmentKind::Bezier,
            };
            let points = primitive
                .uniform_points()
                .into_iter()
                .map(|point| transform.apply(point))
                .collect();

            segments.push(Segment {
                kind,
                points,
                style: style.clone(),
                origin: coord,
            });
        }
    }

    if stale_cells > 0 {
        log::debug!("Skipped {stale_cells} cells with stale tile indices");
    }

    segments
}
