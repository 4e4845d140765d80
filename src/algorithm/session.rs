//! Application state for building and exporting a mosaic
//!
//! A session owns the tile library, the current grid and the path tracer,
//! together with the settings used to regenerate and export. Every edit goes
//! through the session so the grid is regenerated or re-stamped as needed
//! and never renders stale geometry.

use crate::algorithm::stitching::StitchedPath;
use crate::algorithm::tracer::PathTracer;
use crate::io::configuration::{
    DEFAULT_GRID_SIZE, DEFAULT_OUTPUT_TILE_SIZE, DEFAULT_TILE_NAME, DEFAULT_TOLERANCE,
    MAX_GRID_DIMENSION,
};
use crate::io::error::{MosaicError, Result, invalid_parameter, validate_tolerance};
use crate::render::document::{ExportMode, svg_document};
use crate::render::surface::{
    DrawSurface, render_backgrounds, render_tiles_naive, render_with_fallback,
};
use crate::spatial::grid::{CellCoord, GridCell, GridShape, MosaicGrid, SelectionMode};
use crate::spatial::tiles::{Color, TileDesign, TileLibrary, TileShapes};
use std::fmt;
use std::sync::Arc;

/// Settings controlling generation and export
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Number of grid columns
    pub cols: usize,
    /// Number of grid rows
    pub rows: usize,
    /// How tiles are drawn for each cell
    pub selection: SelectionMode,
    /// Endpoint distance under which segments are stitched
    pub tolerance: f64,
    /// Export stitched paths instead of individual tiles
    pub composite: bool,
    /// Edge length of one tile in exported output
    pub output_tile_size: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_GRID_SIZE,
            rows: DEFAULT_GRID_SIZE,
            selection: SelectionMode::Uniform,
            tolerance: DEFAULT_TOLERANCE,
            composite: true,
            output_tile_size: DEFAULT_OUTPUT_TILE_SIZE,
        }
    }
}

impl SessionConfig {
    /// Configuration for a grid of the given shape and base size
    pub fn with_shape(shape: GridShape, size: usize) -> Self {
        let (cols, rows) = shape.dimensions(size);
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    /// Check every setting against its allowed range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first setting out of range
    pub fn validate(&self) -> Result<()> {
        validate_dimension("cols", self.cols)?;
        validate_dimension("rows", self.rows)?;
        validate_tolerance(self.tolerance)?;
        if !(self.output_tile_size.is_finite() && self.output_tile_size > 0.0) {
            return Err(invalid_parameter(
                "output_tile_size",
                &self.output_tile_size,
                &"must be a finite, positive length",
            ));
        }
        Ok(())
    }

    /// Document layout implied by the settings
    pub const fn export_mode(&self) -> ExportMode {
        if self.composite {
            ExportMode::Composite {
                tolerance: self.tolerance,
            }
        } else {
            ExportMode::TileByTile
        }
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if (1..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ))
    }
}

/// Stroke and background settings applied to several tiles at once
#[derive(Clone, Debug, PartialEq)]
pub struct TileStyle {
    /// Fill behind the strokes
    pub background_color: Color,
    /// Foreground stroke colour
    pub primary_color: Color,
    /// Background stroke colour
    pub secondary_color: Color,
    /// Foreground stroke weight
    pub stroke_weight: f64,
    /// Extra width of the background stroke
    pub secondary_width: f64,
    /// Per-shape layering
    pub layered_rendering: bool,
}

impl From<&TileDesign> for TileStyle {
    fn from(tile: &TileDesign) -> Self {
        Self {
            background_color: tile.background_color.clone(),
            primary_color: tile.primary_color.clone(),
            secondary_color: tile.secondary_color.clone(),
            stroke_weight: tile.stroke_weight,
            secondary_width: tile.secondary_width,
            layered_rendering: tile.layered_rendering,
        }
    }
}

/// Owner of the tile library, the grid and the tracer
pub struct MosaicSession {
    library: TileLibrary,
    grid: MosaicGrid,
    tracer: PathTracer,
    config: SessionConfig,
}

impl fmt::Debug for MosaicSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MosaicSession")
            .field("tiles", &self.library.len())
            .field("cols", &self.grid.cols())
            .field("rows", &self.grid.rows())
            .field("seed", &self.grid.seed())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MosaicSession {
    /// Create a session and generate its first grid from `seed`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range or the library
    /// has no tiles
    pub fn new(library: TileLibrary, config: SessionConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        if library.is_empty() {
            return Err(MosaicError::EmptyTileLibrary);
        }

        let grid = MosaicGrid::generate(config.cols, config.rows, &library, config.selection, seed);
        Ok(Self {
            library,
            grid,
            tracer: PathTracer::new(config.output_tile_size),
            config,
        })
    }

    /// Tile designs in use
    pub const fn library(&self) -> &TileLibrary {
        &self.library
    }

    /// Current grid
    pub const fn grid(&self) -> &MosaicGrid {
        &self.grid
    }

    /// Current settings
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Path tracer with its cache
    pub const fn tracer(&self) -> &PathTracer {
        &self.tracer
    }

    /// Replace the settings
    ///
    /// The grid is regenerated with its current seed when the dimensions or
    /// selection mode change; otherwise it is kept as is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the new settings are out of range
    pub fn set_config(&mut self, config: SessionConfig) -> Result<()> {
        config.validate()?;
        let layout_changed = config.cols != self.config.cols
            || config.rows != self.config.rows
            || config.selection != self.config.selection;

        self.config = config;
        self.tracer.set_output_tile_size(config.output_tile_size);
        if layout_changed {
            self.regenerate(self.grid.seed());
        }
        Ok(())
    }

    /// Set the stitching tolerance used for exports
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tolerance is negative or not finite
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<()> {
        self.config.tolerance = validate_tolerance(tolerance)?;
        Ok(())
    }

    /// Fill a new grid from `seed` with the current settings
    pub fn regenerate(&mut self, seed: u64) {
        self.grid = MosaicGrid::generate(
            self.config.cols,
            self.config.rows,
            &self.library,
            self.config.selection,
            seed,
        );
    }

    /// Fill a new grid from a freshly drawn seed and return that seed
    pub fn regenerate_random(&mut self) -> u64 {
        let seed = MosaicGrid::random_seed();
        self.regenerate(seed);
        seed
    }

    /// Place a tile in one cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` for an unknown tile and `InvalidParameter`
    /// for a coordinate outside the grid
    pub fn set_cell(&mut self, coord: CellCoord, cell: GridCell) -> Result<()> {
        if self.library.get(cell.tile_index).is_none() {
            return Err(MosaicError::InvalidTileIndex {
                index: cell.tile_index,
                tile_count: self.library.len(),
            });
        }
        if self.grid.set_cell(coord, Some(cell)) {
            Ok(())
        } else {
            Err(invalid_parameter(
                "coord",
                &coord,
                &format!("outside the {}x{} grid", self.grid.cols(), self.grid.rows()),
            ))
        }
    }

    /// Append a blank tile with the first free `Tile N` name
    pub fn add_tile(&mut self) -> usize {
        let name = self.unique_name(|counter| format!("{DEFAULT_TILE_NAME} {counter}"));
        let index = self.library.push(TileDesign::new(name, TileShapes::default()));
        self.grid.update_tiles();
        index
    }

    /// Append a copy of a tile named `<name> Copy` (or `<name> Copy N`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if there is no tile at `index`
    pub fn duplicate_tile(&mut self, index: usize) -> Result<usize> {
        let mut copy = self.tile(index)?.clone();
        let base = copy.name.clone();
        copy.name = self.unique_name(|counter| {
            if counter == 1 {
                format!("{base} Copy")
            } else {
                format!("{base} Copy {counter}")
            }
        });
        let copy_index = self.library.push(copy);
        self.grid.update_tiles();
        Ok(copy_index)
    }

    /// Replace a tile design; the grid layout is kept
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if there is no tile at `index`
    pub fn update_tile(&mut self, index: usize, tile: TileDesign) -> Result<()> {
        let tile_count = self.library.len();
        let slot = self
            .library
            .get_mut(index)
            .ok_or(MosaicError::InvalidTileIndex { index, tile_count })?;
        *slot = tile;
        self.grid.update_tiles();
        Ok(())
    }

    /// Apply one style to several tiles; shapes and probabilities are kept
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` for the first unknown index, before any
    /// tile is changed
    pub fn apply_style(&mut self, indices: &[usize], style: &TileStyle) -> Result<()> {
        if let Some(&index) = indices.iter().find(|&&index| index >= self.library.len()) {
            return Err(MosaicError::InvalidTileIndex {
                index,
                tile_count: self.library.len(),
            });
        }

        for &index in indices {
            if let Some(tile) = self.library.get_mut(index) {
                tile.background_color = style.background_color.clone();
                tile.primary_color = style.primary_color.clone();
                tile.secondary_color = style.secondary_color.clone();
                tile.stroke_weight = style.stroke_weight;
                tile.secondary_width = style.secondary_width;
                tile.layered_rendering = style.layered_rendering;
            }
        }
        self.grid.update_tiles();
        Ok(())
    }

    /// Remove a tile and regenerate the grid with its current seed
    ///
    /// Later tiles shift down, so the old grid could point at the wrong
    /// design; regenerating keeps every cell valid.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileLibrary` when asked to remove the last tile and
    /// `InvalidTileIndex` if there is no tile at `index`
    pub fn delete_tile(&mut self, index: usize) -> Result<TileDesign> {
        if self.library.len() <= 1 {
            return Err(MosaicError::EmptyTileLibrary);
        }
        let tile_count = self.library.len();
        let removed = self
            .library
            .remove(index)
            .ok_or(MosaicError::InvalidTileIndex { index, tile_count })?;
        self.regenerate(self.grid.seed());
        Ok(removed)
    }

    /// Stitched paths of the current grid at the configured tolerance
    pub fn stitched_paths(&mut self) -> Arc<[StitchedPath]> {
        self.tracer
            .stitch_segments(&self.grid, &self.library, self.config.tolerance)
    }

    /// Complete SVG document in the configured layout
    pub fn svg_document(&mut self) -> String {
        svg_document(
            &mut self.tracer,
            &self.grid,
            &self.library,
            self.config.export_mode(),
        )
    }

    /// Draw the mosaic onto a surface
    ///
    /// Composite sessions draw stitched paths and fall back to individual
    /// tiles if the surface fails part-way; other sessions draw individual
    /// tiles directly.
    ///
    /// # Errors
    ///
    /// Returns `Render` if the surface fails outside the stitched pass
    pub fn render<S>(&mut self, surface: &mut S) -> Result<()>
    where
        S: DrawSurface,
        S::Error: fmt::Display,
    {
        let outcome = if self.config.composite {
            render_with_fallback(
                surface,
                &mut self.tracer,
                &self.grid,
                &self.library,
                self.config.tolerance,
            )
        } else {
            let scale = self.tracer.scale();
            render_backgrounds(surface, &self.grid, &self.library, scale)
                .and_then(|()| render_tiles_naive(surface, &self.grid, &self.library, scale))
        };

        outcome.map_err(|error| MosaicError::Render {
            reason: error.to_string(),
        })
    }

    /// Drop cached geometry
    pub fn clear_cache(&mut self) {
        self.tracer.clear_cache();
    }

    fn tile(&self, index: usize) -> Result<&TileDesign> {
        self.library
            .get(index)
            .ok_or(MosaicError::InvalidTileIndex {
                index,
                tile_count: self.library.len(),
            })
    }

    fn unique_name(&self, candidate: impl Fn(usize) -> String) -> String {
        let mut counter = 1;
        loop {
            let name = candidate(counter);
            if self.library.tiles().iter().all(|tile| tile.name != name) {
                return name;
            }
            counter += 1;
        }
    }
}
