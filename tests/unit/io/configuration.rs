//! Tests for pipeline constants and their relationships

#[cfg(test)]
mod tests {
    use truchet_mosaic::io::configuration::{
        DEFAULT_TOLERANCE, DESIGN_SIZE, MAX_GRID_DIMENSION, MAX_RANDOM_SEED, OUTPUT_PREFIX,
        TILE_CENTER, WIDE_ASPECT_RATIO,
    };

    // Tests the tile centre sits in the middle of the design square
    // Verified by moving the centre off the midpoint
    #[test]
    fn test_tile_center_is_midpoint() {
        assert_eq!(TILE_CENTER * 2.0, DESIGN_SIZE);
    }

    // Tests the default tolerance is small next to a tile
    // Verified by raising the tolerance to a tile width
    #[test]
    fn test_default_tolerance_within_tile() {
        assert!(DEFAULT_TOLERANCE > 0.0);
        assert!(DEFAULT_TOLERANCE * 10.0 < DESIGN_SIZE);
    }

    // Tests generation limits
    // Verified by changing constant values
    #[test]
    fn test_generation_limits() {
        assert_eq!(MAX_RANDOM_SEED, 1_000_000);
        assert_eq!(MAX_GRID_DIMENSION, 1_000);
        assert!((WIDE_ASPECT_RATIO - 1.6).abs() < f64::EPSILON);
        assert_eq!(OUTPUT_PREFIX, "truchet_mosaic");
    }
}
