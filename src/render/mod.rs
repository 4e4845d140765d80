//! Output of stitched mosaics
//!
//! This module turns stitched paths and tile designs into drawable output:
//! - Inner vector markup for stitched paths
//! - Complete SVG documents, composite or tile by tile
//! - Immediate-mode drawing onto an abstract surface, with a per-tile fallback

/// Full SVG documents for a mosaic
pub mod document;
/// Vector markup for stitched paths
pub mod markup;
/// Drawing surfaces and immediate-mode rendering
pub mod surface;
