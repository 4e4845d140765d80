//! Grid and tile data structures
//!
//! This module contains the inputs of the stitching pipeline:
//! - Tile designs, primitives and stroke styles
//! - The mosaic grid and its seeded generation

use std::sync::atomic::{AtomicU64, Ordering};

/// Mosaic grid model and generation
pub mod grid;
/// Tile designs, primitives and the tile library
pub mod tiles;

pub use grid::MosaicGrid;
pub use tiles::TileLibrary;

static GENERATION: AtomicU64 = AtomicU64::new(1);

/// Process-unique stamp identifying one state of a grid or tile library
pub(crate) fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}
