//! Pipeline constants and runtime configuration defaults

// Design space shared by every tile
/// Side length of a tile in design units
pub const DESIGN_SIZE: f64 = 600.0;
/// Coordinate of the tile centre on both axes
pub const TILE_CENTER: f64 = 300.0;

// Stitching
/// Default endpoint distance under which segments are joined
pub const DEFAULT_TOLERANCE: f64 = 5.0;

// Grid generation
/// Default number of tiles along the shorter side of the mosaic
pub const DEFAULT_GRID_SIZE: usize = 5;
/// Long side over short side for the non-square grid shapes
pub const WIDE_ASPECT_RATIO: f64 = 1.6;
/// Exclusive upper bound for randomly drawn seeds
pub const MAX_RANDOM_SEED: u64 = 1_000_000;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

// Export settings
/// Default edge length of one tile in the exported document
pub const DEFAULT_OUTPUT_TILE_SIZE: f64 = 100.0;
/// Prefix of exported file names
pub const OUTPUT_PREFIX: &str = "truchet_mosaic";

// Tile defaults applied to missing fields when loading a library
/// Default tile background colour
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";
/// Default primary stroke colour
pub const DEFAULT_PRIMARY_COLOR: &str = "#2E86C1";
/// Default secondary stroke colour
pub const DEFAULT_SECONDARY_COLOR: &str = "#E74C3C";
/// Default primary stroke weight
pub const DEFAULT_STROKE_WEIGHT: f64 = 5.0;
/// Default secondary stroke width added around the primary stroke
pub const DEFAULT_SECONDARY_WIDTH: f64 = 10.0;
/// Default selection weight
pub const DEFAULT_PROBABILITY: f64 = 1.0;
/// Default tile name
pub const DEFAULT_TILE_NAME: &str = "Tile";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
