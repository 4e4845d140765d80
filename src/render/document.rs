//! Standalone SVG documents for a whole mosaic
//!
//! Two layouts are supported. Composite documents draw every tile background
//! and then the stitched paths on top. Tile-by-tile documents place each tile
//! in its own rotated group and draw its primitives unstitched, which keeps
//! the seams between neighbouring tiles visible.

use crate::algorithm::tracer::PathTracer;
use crate::io::configuration::DESIGN_SIZE;
use crate::math::geometry::Point;
use crate::render::markup::{attribute, number};
use crate::spatial::grid::MosaicGrid;
use crate::spatial::tiles::{Color, Primitive, TileDesign, TileLibrary};
use std::fmt::Write;

/// Layout of an exported document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportMode {
    /// Backgrounds, then paths stitched at `tolerance` across the whole grid
    Composite {
        /// Stitching tolerance in design units
        tolerance: f64,
    },
    /// One rotated group per tile, no stitching
    TileByTile,
}

/// Complete SVG document for the mosaic at the tracer's output size
///
/// The document is `cols × tile_size` wide and `rows × tile_size` tall.
/// Cells referring to a tile missing from `tiles` are left blank.
pub fn svg_document(
    tracer: &mut PathTracer,
    grid: &MosaicGrid,
    tiles: &TileLibrary,
    mode: ExportMode,
) -> String {
    let tile_size = tracer.output_tile_size();
    let width = number(grid.cols() as f64 * tile_size);
    let height = number(grid.rows() as f64 * tile_size);

    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">"
    );

    match mode {
        ExportMode::Composite { tolerance } => {
            for (coord, cell) in grid.iter() {
                let Some(tile) = tiles.get(cell.tile_index) else {
                    continue;
                };
                let _ = writeln!(
                    svg,
                    "    <rect x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" fill=\"{}\"/>",
                    number(coord.col as f64 * tile_size),
                    number(coord.row as f64 * tile_size),
                    attribute(&tile.background_color),
                    size = number(tile_size),
                );
            }
            svg.push_str(&tracer.generate_vector_markup(grid, tiles, tolerance));
        }
        ExportMode::TileByTile => {
            let half = tile_size / 2.0;
            for (coord, cell) in grid.iter() {
                let Some(tile) = tiles.get(cell.tile_index) else {
                    continue;
                };
                let _ = writeln!(
                    svg,
                    "  <g transform=\"translate({}, {}) rotate({}) translate({}, {})\">",
                    number(coord.col as f64 * tile_size + half),
                    number(coord.row as f64 * tile_size + half),
                    cell.rotation.degrees(),
                    number(-half),
                    number(-half),
                );
                let _ = writeln!(
                    svg,
                    "    <rect x=\"0\" y=\"0\" width=\"{size}\" height=\"{size}\" fill=\"{}\"/>",
                    attribute(&tile.background_color),
                    size = number(tile_size),
                );
                svg.push_str(&tile_markup(tile, tile_size));
                svg.push_str("  </g>\n");
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Markup for one unrotated tile drawn as a `tile_size` square
///
/// Quads are written as quadratic curves and cubics as cubic curves, both
/// with flat caps. Layered tiles interleave background and foreground per
/// shape; other tiles draw every background first. Points come last, as
/// discs in the primary colour.
pub fn tile_markup(tile: &TileDesign, tile_size: f64) -> String {
    let scale = tile_size / DESIGN_SIZE;
    let primitives = tile.primitives();
    let curves: Vec<String> = primitives
        .iter()
        .filter_map(|primitive| curve_data(primitive, scale))
        .collect();

    let background_width = (tile.stroke_weight + tile.secondary_width) * scale;
    let foreground_width = tile.stroke_weight * scale;

    let mut svg = String::new();
    if tile.layered_rendering {
        for data in &curves {
            push_curve(&mut svg, data, &tile.secondary_color, background_width);
            push_curve(&mut svg, data, &tile.primary_color, foreground_width);
        }
    } else {
        for data in &curves {
            push_curve(&mut svg, data, &tile.secondary_color, background_width);
        }
        for data in &curves {
            push_curve(&mut svg, data, &tile.primary_color, foreground_width);
        }
    }

    for primitive in &primitives {
        if let Primitive::Point(point) = primitive {
            let center = point.scaled(scale);
            let _ = writeln!(
                svg,
                "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                number(center.x),
                number(center.y),
                number(foreground_width / 2.0),
                attribute(&tile.primary_color)
            );
        }
    }

    svg
}

fn curve_data(primitive: &Primitive, scale: f64) -> Option<String> {
    let coordinates = |point: Point| {
        let point = point.scaled(scale);
        format!("{} {}", number(point.x), number(point.y))
    };

    match *primitive {
        Primitive::Point(_) => None,
        Primitive::Quad([start, control, end]) => Some(format!(
            "M {} Q {} {}",
            coordinates(start),
            coordinates(control),
            coordinates(end)
        )),
        Primitive::Cubic([start, control1, control2, end]) => Some(format!(
            "M {} C {}, {}, {}",
            coordinates(start),
            coordinates(control1),
            coordinates(control2),
            coordinates(end)
        )),
    }
}

fn push_curve(svg: &mut String, data: &str, color: &Color, width: f64) {
    let _ = writeln!(
        svg,
        "    <path d=\"{data}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"butt\"/>",
        attribute(color),
        number(width)
    );
}
