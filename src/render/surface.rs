//! Immediate-mode rendering onto an abstract drawing surface
//!
//! Stitched paths are drawn in two passes: every background stroke first,
//! then every foreground stroke. Drawing the passes over the whole mosaic
//! rather than per tile gives one continuous tube across tile seams.

use crate::algorithm::extraction::{CellTransform, SegmentKind};
use crate::algorithm::stitching::StitchedPath;
use crate::algorithm::tracer::PathTracer;
use crate::io::configuration::DESIGN_SIZE;
use crate::math::geometry::Point;
use crate::spatial::grid::MosaicGrid;
use crate::spatial::tiles::{Color, Primitive, TileDesign, TileLibrary};
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;

/// Shape drawn at the open ends of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Stroke stops flush with the endpoint
    Butt,
    /// Half-disc past the endpoint
    Round,
}

/// Shape drawn where two pieces of a stroke meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// Rounded corner
    Round,
}

/// Stroke parameters for [`DrawSurface::stroke_path`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeStyle {
    /// Stroke colour
    pub color: Color,
    /// Line width in output units
    pub width: f64,
    /// End cap
    pub cap: LineCap,
    /// Corner join
    pub join: LineJoin,
}

impl StrokeStyle {
    /// Rounded caps and joins, as used for stitched paths
    pub const fn round(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }

    /// Flat caps with round joins, as used for individual tiles
    pub const fn butt(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
            join: LineJoin::Round,
        }
    }
}

/// A 2D target accepting fill and stroke commands in output coordinates
///
/// A path is built with `move_to` followed by any number of `line_to` and
/// `cubic_to` calls, and drawn by `stroke_path`.
pub trait DrawSurface {
    /// Failure reported by the surface
    type Error;

    /// Fill an axis-aligned rectangle
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the command cannot be drawn
    fn fill_rect(&mut self, origin: Point, size: f64, color: &Color) -> Result<(), Self::Error>;

    /// Fill a disc
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the command cannot be drawn
    fn fill_circle(&mut self, center: Point, diameter: f64, color: &Color)
    -> Result<(), Self::Error>;

    /// Start a new path at `start`
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the command cannot be drawn
    fn move_to(&mut self, start: Point) -> Result<(), Self::Error>;

    /// Extend the current path with a straight line
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the command cannot be drawn
    fn line_to(&mut self, point: Point) -> Result<(), Self::Error>;

    /// Extend the current path with a cubic Bézier arc
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the command cannot be drawn
    fn cubic_to(&mut self, control1: Point, control2: Point, end: Point)
    -> Result<(), Self::Error>;

    /// Stroke the current path and discard it
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the command cannot be drawn
    fn stroke_path(&mut self, style: &StrokeStyle) -> Result<(), Self::Error>;
}

/// A recorded surface command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// See [`DrawSurface::fill_rect`]
    FillRect {
        /// Top-left corner
        origin: Point,
        /// Side length
        size: f64,
        /// Fill colour
        color: Color,
    },
    /// See [`DrawSurface::fill_circle`]
    FillCircle {
        /// Disc centre
        center: Point,
        /// Disc diameter
        diameter: f64,
        /// Fill colour
        color: Color,
    },
    /// See [`DrawSurface::move_to`]
    MoveTo {
        /// First point of the path
        start: Point,
    },
    /// See [`DrawSurface::line_to`]
    LineTo {
        /// Line end
        point: Point,
    },
    /// See [`DrawSurface::cubic_to`]
    CubicTo {
        /// First control point
        control1: Point,
        /// Second control point
        control2: Point,
        /// Arc end
        end: Point,
    },
    /// See [`DrawSurface::stroke_path`]
    StrokePath {
        /// Stroke parameters
        style: StrokeStyle,
    },
}

/// Surface that records every command as a display list
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Commands in the order they were issued
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of strokes issued so far
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::StrokePath { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    type Error = Infallible;

    fn fill_rect(&mut self, origin: Point, size: f64, color: &Color) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color: color.clone(),
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        diameter: f64,
        color: &Color,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillCircle {
            center,
            diameter,
            color: color.clone(),
        });
        Ok(())
    }

    fn move_to(&mut self, start: Point) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::MoveTo { start });
        Ok(())
    }

    fn line_to(&mut self, point: Point) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::LineTo { point });
        Ok(())
    }

    fn cubic_to(
        &mut self,
        control1: Point,
        control2: Point,
        end: Point,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::CubicTo {
            control1,
            control2,
            end,
        });
        Ok(())
    }

    fn stroke_path(&mut self, style: &StrokeStyle) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::StrokePath {
            style: style.clone(),
        });
        Ok(())
    }
}

/// Draw stitched paths in background-then-foreground order
///
/// Paths without a secondary width get no background stroke. `scale` maps
/// design units to output units.
///
/// # Errors
///
/// Returns the first error reported by the surface
pub fn render_paths<S: DrawSurface>(
    surface: &mut S,
    paths: &[StitchedPath],
    scale: f64,
) -> Result<(), S::Error> {
    for path in paths.iter().filter(|path| path.style.secondary_width > 0.0) {
        draw_path(
            surface,
            path,
            &path.style.secondary_color,
            path.style.secondary_total_weight * scale,
            scale,
        )?;
    }

    for path in paths {
        draw_path(
            surface,
            path,
            &path.style.primary_color,
            path.style.primary_weight * scale,
            scale,
        )?;
    }

    Ok(())
}

fn draw_path<S: DrawSurface>(
    surface: &mut S,
    path: &StitchedPath,
    color: &Color,
    width: f64,
    scale: f64,
) -> Result<(), S::Error> {
    let Some(&start) = path.points.first() else {
        return Ok(());
    };

    match path.kind {
        SegmentKind::Point => surface.fill_circle(start.scaled(scale), width, color),
        SegmentKind::Bezier => {
            surface.move_to(start.scaled(scale))?;
            if path.is_degenerate() {
                for point in path.points.iter().skip(1) {
                    surface.line_to(point.scaled(scale))?;
                }
            } else {
                for [control1, control2, end] in path.cubic_arcs() {
                    surface.cubic_to(
                        control1.scaled(scale),
                        control2.scaled(scale),
                        end.scaled(scale),
                    )?;
                }
            }
            surface.stroke_path(&StrokeStyle::round(color.clone(), width))
        }
    }
}

/// Fill the square behind every placed tile with its background colour
///
/// # Errors
///
/// Returns the first error reported by the surface
pub fn render_backgrounds<S: DrawSurface>(
    surface: &mut S,
    grid: &MosaicGrid,
    tiles: &TileLibrary,
    scale: f64,
) -> Result<(), S::Error> {
    let tile_size = DESIGN_SIZE * scale;
    for (coord, cell) in grid.iter() {
        if let Some(tile) = tiles.get(cell.tile_index) {
            let origin = Point::new(coord.col as f64 * tile_size, coord.row as f64 * tile_size);
            surface.fill_rect(origin, tile_size, &tile.background_color)?;
        }
    }
    Ok(())
}

/// Draw each tile on its own, without stitching
///
/// Layered tiles draw background and foreground per shape; the others draw
/// all backgrounds of the tile and then all foregrounds. Points are drawn on
/// top in the primary colour.
///
/// # Errors
///
/// Returns the first error reported by the surface
pub fn render_tiles_naive<S: DrawSurface>(
    surface: &mut S,
    grid: &MosaicGrid,
    tiles: &TileLibrary,
    scale: f64,
) -> Result<(), S::Error> {
    for (coord, cell) in grid.iter() {
        let Some(tile) = tiles.get(cell.tile_index) else {
            continue;
        };
        let transform = CellTransform::new(coord, cell);
        draw_tile(surface, tile, &transform, scale)?;
    }
    Ok(())
}

fn draw_tile<S: DrawSurface>(
    surface: &mut S,
    tile: &TileDesign,
    transform: &CellTransform,
    scale: f64,
) -> Result<(), S::Error> {
    let primitives = tile.primitives();
    let curves: Vec<Vec<Point>> = primitives
        .iter()
        .filter(|primitive| !matches!(primitive, Primitive::Point(_)))
        .map(|primitive| {
            primitive
                .uniform_points()
                .into_iter()
                .map(|point| transform.apply(point).scaled(scale))
                .collect()
        })
        .collect();

    let background = StrokeStyle::butt(
        tile.secondary_color.clone(),
        (tile.stroke_weight + tile.secondary_width) * scale,
    );
    let foreground = StrokeStyle::butt(tile.primary_color.clone(), tile.stroke_weight * scale);

    if tile.layered_rendering {
        for curve in &curves {
            stroke_curve(surface, curve, &background)?;
            stroke_curve(surface, curve, &foreground)?;
        }
    } else {
        for curve in &curves {
            stroke_curve(surface, curve, &background)?;
        }
        for curve in &curves {
            stroke_curve(surface, curve, &foreground)?;
        }
    }

    for primitive in &primitives {
        if let Primitive::Point(point) = primitive {
            surface.fill_circle(
                transform.apply(*point).scaled(scale),
                tile.stroke_weight * scale,
                &tile.primary_color,
            )?;
        }
    }

    Ok(())
}

fn stroke_curve<S: DrawSurface>(
    surface: &mut S,
    curve: &[Point],
    style: &StrokeStyle,
) -> Result<(), S::Error> {
    let Ok([start, control1, control2, end]) = <[Point; 4]>::try_from(curve) else {
        return Ok(());
    };
    surface.move_to(start)?;
    surface.cubic_to(control1, control2, end)?;
    surface.stroke_path(style)
}

/// Draw the mosaic with stitched paths, falling back to per-tile drawing
///
/// Backgrounds are drawn first. If the stitched pass fails part-way, the
/// failure is logged and every tile is drawn on its own instead so the
/// surface is never left with only backgrounds.
///
/// # Errors
///
/// Returns a surface error from the background pass or from the fallback
pub fn render_with_fallback<S>(
    surface: &mut S,
    tracer: &mut PathTracer,
    grid: &MosaicGrid,
    tiles: &TileLibrary,
    tolerance: f64,
) -> Result<(), S::Error>
where
    S: DrawSurface,
    S::Error: fmt::Display,
{
    let scale = tracer.scale();
    render_backgrounds(surface, grid, tiles, scale)?;

    if let Err(error) = tracer.render_to_surface(surface, grid, tiles, tolerance) {
        log::warn!("Stitched rendering failed ({error}), drawing tiles individually");
        render_tiles_naive(surface, grid, tiles, scale)?;
    }

    Ok(())
}
