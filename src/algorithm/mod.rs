/// Single-slot memo for extracted segments and stitched paths
pub mod cache;
/// World-space segment extraction from the grid
pub mod extraction;
/// Application state owning library, grid and tracer
pub mod session;
/// Greedy stitching of segments into continuous paths
pub mod stitching;
/// Cached extraction, stitching and rendering service
pub mod tracer;
