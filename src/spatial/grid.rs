//! Mosaic grid model and seeded generation
//!
//! The grid is stored column-major (`[col, row]`) so that walking it in
//! index order visits every row of column 0 before column 1, which is the
//! order segments are extracted and stitched in.

use crate::io::configuration::{MAX_GRID_DIMENSION, MAX_RANDOM_SEED, WIDE_ASPECT_RATIO};
use crate::math::probability::{select_uniform_index, select_weighted_index};
use crate::spatial::next_generation;
use crate::spatial::tiles::TileLibrary;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt;

/// Quarter-turn rotation of a placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// No rotation
    #[default]
    R0,
    /// 90 degrees
    R90,
    /// 180 degrees
    R180,
    /// 270 degrees
    R270,
}

impl Rotation {
    /// Angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Rotation for a multiple of 90 degrees, wrapping around
    pub const fn from_quarter_turns(turns: usize) -> Self {
        match turns % 4 {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }

    /// Rotation matching an angle in degrees, if it is a multiple of 90
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(Self::from_quarter_turns(degrees.rem_euclid(360) as usize / 90))
    }

    /// Exact `(cos, sin)` of the angle
    ///
    /// Quarter turns are exact in integers, so rotated endpoints of
    /// neighbouring tiles still coincide bit-for-bit.
    pub const fn cos_sin(self) -> (f64, f64) {
        match self {
            Self::R0 => (1.0, 0.0),
            Self::R90 => (0.0, 1.0),
            Self::R180 => (-1.0, 0.0),
            Self::R270 => (0.0, -1.0),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    /// Column index, growing to the right
    pub col: usize,
    /// Row index, growing downwards
    pub row: usize,
}

impl CellCoord {
    /// Create a coordinate
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A placed tile: which design and how it is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Index into the tile library at generation time
    pub tile_index: usize,
    /// Rotation about the tile centre
    pub rotation: Rotation,
}

/// How tile indices are drawn when filling a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every tile is equally likely
    #[default]
    Uniform,
    /// Tiles are drawn in proportion to their probability weight
    Weighted,
}

/// Aspect of the generated grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GridShape {
    /// `size × size`
    #[default]
    Square,
    /// Wider than tall, long side scaled by `WIDE_ASPECT_RATIO`
    Horizontal,
    /// Taller than wide, long side scaled by `WIDE_ASPECT_RATIO`
    Vertical,
}

impl GridShape {
    /// Grid dimensions `(cols, rows)` for a base size
    pub fn dimensions(self, size: usize) -> (usize, usize) {
        let long = (size as f64 * WIDE_ASPECT_RATIO).round() as usize;
        match self {
            Self::Square => (size, size),
            Self::Horizontal => (long, size),
            Self::Vertical => (size, long),
        }
    }
}

/// A `cols × rows` arrangement of placed tiles
///
/// Cells may be empty. Contents change only through [`MosaicGrid::generate`],
/// [`MosaicGrid::set_cell`] and [`MosaicGrid::update_tiles`], each of which
/// stamps a new generation.
#[derive(Debug, Clone)]
pub struct MosaicGrid {
    cells: Array2<Option<GridCell>>,
    seed: u64,
    generation: u64,
}

impl Default for MosaicGrid {
    fn default() -> Self {
        Self::empty(0, 0)
    }
}

/// Cap a requested dimension at `MAX_GRID_DIMENSION`
fn bounded_dimension(axis: &str, requested: usize) -> usize {
    if requested > MAX_GRID_DIMENSION {
        log::warn!("Clamping {requested} {axis} to {MAX_GRID_DIMENSION}");
        MAX_GRID_DIMENSION
    } else {
        requested
    }
}

impl MosaicGrid {
    /// Create a grid with every cell empty
    ///
    /// Each dimension is clamped to `MAX_GRID_DIMENSION`.
    pub fn empty(cols: usize, rows: usize) -> Self {
        let shape = (bounded_dimension("cols", cols), bounded_dimension("rows", rows));
        Self {
            cells: Array2::from_elem(shape, None),
            seed: 0,
            generation: next_generation(),
        }
    }

    /// Fill a new grid from `seed`
    ///
    /// Cells are visited column by column. Each draws a tile index (uniform or
    /// weighted by probability) and then a quarter-turn rotation from the same
    /// random stream, so a seed always reproduces the same mosaic for the same
    /// library size and weights. An empty library leaves every cell empty.
    /// Each dimension is clamped to `MAX_GRID_DIMENSION`.
    pub fn generate(
        cols: usize,
        rows: usize,
        tiles: &TileLibrary,
        selection: SelectionMode,
        seed: u64,
    ) -> Self {
        let cols = bounded_dimension("cols", cols);
        let rows = bounded_dimension("rows", rows);
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = tiles.probabilities();
        let mut cells = Array2::from_elem((cols, rows), None);

        for cell in &mut cells {
            let tile_index = match selection {
                SelectionMode::Uniform => select_uniform_index(tiles.len(), &mut rng),
                SelectionMode::Weighted => select_weighted_index(&weights, &mut rng),
            };
            *cell = tile_index.map(|tile_index| GridCell {
                tile_index,
                rotation: Rotation::from_quarter_turns(rng.random_range(0..4)),
            });
        }

        log::debug!(
            "Generated {cols}x{rows} grid from seed {seed} over {} tiles",
            tiles.len()
        );

        Self {
            cells,
            seed,
            generation: next_generation(),
        }
    }

    /// Draw a fresh seed for [`MosaicGrid::generate`]
    pub fn random_seed() -> u64 {
        rand::rng().random_range(0..MAX_RANDOM_SEED)
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.dim().0
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.dim().1
    }

    /// Check whether the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Seed the grid was generated from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generation stamp of the current contents
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Cell at a coordinate; `None` when out of range or empty
    pub fn cell(&self, coord: CellCoord) -> Option<GridCell> {
        self.cells.get([coord.col, coord.row]).copied().flatten()
    }

    /// Replace a cell, returning whether the coordinate was in range
    pub fn set_cell(&mut self, coord: CellCoord, cell: Option<GridCell>) -> bool {
        let Some(slot) = self.cells.get_mut([coord.col, coord.row]) else {
            return false;
        };
        *slot = cell;
        self.generation = next_generation();
        true
    }

    /// Record that the tile definitions behind the grid changed
    ///
    /// Cell contents are kept; only the generation moves on so cached
    /// geometry built from the old tiles is discarded.
    pub fn update_tiles(&mut self) {
        self.generation = next_generation();
    }

    /// Occupied cells in column-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, GridCell)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((col, row), cell)| cell.map(|cell| (CellCoord::new(col, row), cell)))
    }

    /// Count of cells whose tile index is missing from `tiles`
    pub fn stale_cell_count(&self, tiles: &TileLibrary) -> usize {
        self.iter()
            .filter(|(_, cell)| tiles.get(cell.tile_index).is_none())
            .count()
    }
}
