//! Tests for point arithmetic, rotation and quadratic elevation

#[cfg(test)]
mod tests {
    use truchet_mosaic::math::geometry::{Point, distance_squared, quad_to_cubic, rotate_about};

    // Tests squared distance avoids the square root
    // Verified by returning the plain distance
    #[test]
    fn test_distance_squared() {
        assert_eq!(distance_squared(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 25.0);
        assert_eq!(distance_squared(Point::new(1.0, 1.0), Point::new(1.0, 1.0)), 0.0);
    }

    // Tests point operators and uniform scaling
    // Verified by scaling only the x coordinate
    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 8.0);

        assert_eq!(a + b, Point::new(5.0, 10.0));
        assert_eq!(b - a, Point::new(3.0, 6.0));
        assert_eq!(b.scaled(0.5), Point::new(2.0, 4.0));
        assert_eq!(a * 3.0, Point::new(3.0, 6.0));
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert_eq!(a.to_string(), "(1, 2)");
    }

    // Tests quarter turns about the tile centre are exact and clockwise on screen
    // Verified by negating the sine coefficient
    #[test]
    fn test_rotate_about_quarter_turns() {
        let center = Point::new(300.0, 300.0);
        let corner = Point::new(0.0, 0.0);

        assert_eq!(rotate_about(corner, center, (1.0, 0.0)), corner);
        assert_eq!(rotate_about(corner, center, (0.0, 1.0)), Point::new(600.0, 0.0));
        assert_eq!(rotate_about(corner, center, (-1.0, 0.0)), Point::new(600.0, 600.0));
        assert_eq!(rotate_about(corner, center, (0.0, -1.0)), Point::new(0.0, 600.0));
    }

    // Tests elevation keeps endpoints and places controls two thirds towards the quad control
    // Verified by using one half instead of two thirds
    #[test]
    fn test_quad_to_cubic() {
        let [p0, c1, c2, p3] = quad_to_cubic([
            Point::new(0.0, 300.0),
            Point::new(300.0, 300.0),
            Point::new(300.0, 0.0),
        ]);

        assert_eq!(p0, Point::new(0.0, 300.0));
        assert_eq!(p3, Point::new(300.0, 0.0));
        assert!((c1.x - 200.0).abs() < 1e-9);
        assert!((c1.y - 300.0).abs() < 1e-9);
        assert!((c2.x - 300.0).abs() < 1e-9);
        assert!((c2.y - 200.0).abs() < 1e-9);
    }
}
