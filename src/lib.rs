//! Truchet tile mosaics with stitched vector path export
//!
//! Tile designs made of points and Bézier curves are placed on a randomized
//! grid. The curves of neighbouring tiles are then chained into as few
//! continuous paths as possible, so the exported artwork draws each line as
//! one stroke instead of one stroke per tile.

#![forbid(unsafe_code)]

/// Segment extraction, stitching, caching and the application session
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Geometry and random selection helpers
pub mod math;
/// Vector markup, SVG documents and drawing surfaces
pub mod render;
/// Grid and tile data structures
pub mod spatial;

pub use io::error::{MosaicError, Result};
