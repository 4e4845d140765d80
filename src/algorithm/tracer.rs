//! Cached extraction, stitching and rendering service

use crate::algorithm::cache::{CacheStats, SegmentKey, StitchCache, StitchKey};
use crate::algorithm::extraction::{Segment, extract_segments};
use crate::algorithm::stitching::{StitchedPath, stitch_segments};
use crate::io::configuration::{DEFAULT_OUTPUT_TILE_SIZE, DESIGN_SIZE};
use crate::render::markup::paths_to_markup;
use crate::render::surface::{DrawSurface, render_paths};
use crate::spatial::grid::MosaicGrid;
use crate::spatial::tiles::TileLibrary;
use std::sync::Arc;

/// Turns a grid into stitched paths and renders them at one output size
///
/// The most recent extraction and stitching run are memoized. Cache keys
/// carry the generation stamps of the grid and tile library, so changing
/// either one is picked up on the next call.
pub struct PathTracer {
    output_tile_size: f64,
    cache: StitchCache,
}

impl Default for PathTracer {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_TILE_SIZE)
    }
}

impl PathTracer {
    /// Create a tracer drawing each tile as an `output_tile_size` square
    pub fn new(output_tile_size: f64) -> Self {
        Self {
            output_tile_size,
            cache: StitchCache::new(),
        }
    }

    /// Side length of one tile in output units
    pub const fn output_tile_size(&self) -> f64 {
        self.output_tile_size
    }

    /// Change the output size; cached geometry is unaffected
    pub const fn set_output_tile_size(&mut self, output_tile_size: f64) {
        self.output_tile_size = output_tile_size;
    }

    /// Factor from design units to output units
    pub const fn scale(&self) -> f64 {
        self.output_tile_size / DESIGN_SIZE
    }

    /// Cache hit and miss counters
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }

    /// World-space segments of the grid, extracted at most once per input state
    pub fn extract_segments(&mut self, grid: &MosaicGrid, tiles: &TileLibrary) -> Arc<[Segment]> {
        self.cache
            .get_or_extract(segment_key(grid, tiles), || extract_segments(grid, tiles))
    }

    /// Stitched paths of the grid, recomputed only when an input changed
    ///
    /// Repeated calls with the same grid, library and tolerance return the
    /// same shared allocation.
    pub fn stitch_segments(
        &mut self,
        grid: &MosaicGrid,
        tiles: &TileLibrary,
        tolerance: f64,
    ) -> Arc<[StitchedPath]> {
        let key = StitchKey::new(segment_key(grid, tiles), tolerance);
        let segments = self.extract_segments(grid, tiles);
        self.cache
            .get_or_stitch(key, || stitch_segments(&segments, tolerance))
    }

    /// Forget every cached result
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Inner vector markup of the stitched mosaic
    pub fn generate_vector_markup(
        &mut self,
        grid: &MosaicGrid,
        tiles: &TileLibrary,
        tolerance: f64,
    ) -> String {
        let paths = self.stitch_segments(grid, tiles, tolerance);
        paths_to_markup(&paths, self.scale())
    }

    /// Draw the stitched mosaic onto a surface
    ///
    /// Backgrounds of the tiles are not drawn; see
    /// [`crate::render::surface::render_with_fallback`] for the full mosaic.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the surface
    pub fn render_to_surface<S: DrawSurface>(
        &mut self,
        surface: &mut S,
        grid: &MosaicGrid,
        tiles: &TileLibrary,
        tolerance: f64,
    ) -> Result<(), S::Error> {
        let paths = self.stitch_segments(grid, tiles, tolerance);
        render_paths(surface, &paths, self.scale())
    }
}

const fn segment_key(grid: &MosaicGrid, tiles: &TileLibrary) -> SegmentKey {
    SegmentKey {
        grid_generation: grid.generation(),
        tiles_generation: tiles.generation(),
    }
}
