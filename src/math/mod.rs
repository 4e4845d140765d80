//! Mathematical utilities for the mosaic pipeline

/// Points, distances and the rotation / curve elevation transforms
pub mod geometry;
/// Uniform and weighted random index selection
pub mod probability;
