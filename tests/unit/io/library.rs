//! Tests for reading, validating and writing tile library files

#[cfg(test)]
mod tests {
    use std::path::Path;
    use tempfile::TempDir;
    use truchet_mosaic::MosaicError;
    use truchet_mosaic::io::library::{load_library, parse_library, save_library, validate_tile};
    use truchet_mosaic::math::geometry::Point;
    use truchet_mosaic::spatial::tiles::{Color, TileDesign, TileLibrary};

    fn parse(json: &str) -> truchet_mosaic::Result<TileLibrary> {
        parse_library(json, Path::new("tiles.json"))
    }

    // Tests a bare array of tiles is accepted
    // Verified by requiring the tiles wrapper object
    #[test]
    fn test_parse_bare_array() {
        let library = parse(r##"[{"name": "Dot", "shapes": {"points": [{"x": 300, "y": 300}]}}]"##)
            .expect("bare array is a library");

        assert_eq!(library.len(), 1);
        let tile = library.get(0).expect("one tile");
        assert_eq!(tile.name, "Dot");
        assert_eq!(tile.shapes.points, vec![Point::new(300.0, 300.0)]);
    }

    // Tests the project file shape with a tiles field is accepted
    // Verified by only accepting bare arrays
    #[test]
    fn test_parse_project_object() {
        let json = r##"{"tiles": [{"name": "A"}, {"name": "B", "probability": 3}]}"##;
        let library = parse(json).expect("project object is a library");

        assert_eq!(library.len(), 2);
        assert_eq!(library.probabilities(), vec![1.0, 3.0]);
    }

    // Tests missing fields take the library defaults
    // Verified by changing the default primary colour
    #[test]
    fn test_parse_applies_defaults() {
        let library = parse("[{}]").expect("empty tile object is valid");
        let tile = library.get(0).expect("one tile");

        assert_eq!(tile.name, "Tile");
        assert_eq!(tile.background_color, Color::new("#FFFFFF"));
        assert_eq!(tile.primary_color, Color::new("#2E86C1"));
        assert_eq!(tile.secondary_color, Color::new("#E74C3C"));
        assert_eq!(tile.stroke_weight, 5.0);
        assert_eq!(tile.secondary_width, 10.0);
        assert_eq!(tile.probability, 1.0);
        assert!(!tile.layered_rendering);
        assert!(tile.shapes.is_empty());
    }

    // Tests camelCase field names are read
    // Verified by reading snake_case field names
    #[test]
    fn test_parse_camel_case_fields() {
        let json = r##"[{"strokeWeight": 20, "secondaryStrokeWidth": 4, "layeredRendering": true, "primaryColor": "#000"}]"##;
        let library = parse(json).expect("valid tile");
        let tile = library.get(0).expect("one tile");

        assert_eq!(tile.stroke_weight, 20.0);
        assert_eq!(tile.secondary_width, 4.0);
        assert!(tile.layered_rendering);
        assert_eq!(tile.primary_color.as_str(), "#000");
    }

    // Tests an invalid colour names the offending field
    // Verified by skipping colour validation
    #[test]
    fn test_parse_rejects_invalid_color() {
        let result = parse(r#"[{"secondaryColor": "orange"}]"#);

        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "secondaryColor",
                ..
            })
        ));
    }

    // Tests negative weights are rejected
    // Verified by accepting negative stroke weights
    #[test]
    fn test_validate_tile_rejects_negative_weight() {
        let mut tile = TileDesign::classic();
        assert!(validate_tile(&tile).is_ok());

        tile.stroke_weight = -1.0;
        assert!(matches!(
            validate_tile(&tile),
            Err(MosaicError::InvalidParameter {
                parameter: "strokeWeight",
                ..
            })
        ));
    }

    // Tests an empty library and malformed JSON are reported distinctly
    // Verified by returning an empty library for an empty array
    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("[]"), Err(MosaicError::EmptyTileLibrary)));
        assert!(matches!(
            parse(r#"{"tiles": []}"#),
            Err(MosaicError::EmptyTileLibrary)
        ));
        assert!(matches!(
            parse("not json"),
            Err(MosaicError::LibraryLoad { .. })
        ));
    }

    // Tests a saved library loads back with the same tiles
    // Verified by saving without the secondary stroke width rename
    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("library.json");
        let library = TileLibrary::builtin();

        save_library(&path, &library).expect("write library");
        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.contains("\"tiles\""));
        assert!(text.contains("\"secondaryStrokeWidth\""));

        let loaded = load_library(&path).expect("load library");
        assert_eq!(loaded.tiles(), library.tiles());
    }

    // Tests reading a missing file is a file system error
    // Verified by mapping read failures to library load errors
    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("temp dir");
        let result = load_library(&dir.path().join("missing.json"));

        assert!(matches!(
            result,
            Err(MosaicError::FileSystem {
                operation: "read tile library",
                ..
            })
        ));
    }
}
