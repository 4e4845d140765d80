//! Tests for command-line parsing, output naming and batch processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;
    use truchet_mosaic::io::cli::{Cli, MosaicProcessor};
    use truchet_mosaic::io::configuration::{DEFAULT_GRID_SIZE, DEFAULT_TOLERANCE};
    use truchet_mosaic::io::library::save_library;
    use truchet_mosaic::math::geometry::Point;
    use truchet_mosaic::spatial::grid::{GridShape, SelectionMode};
    use truchet_mosaic::spatial::tiles::{TileDesign, TileLibrary};

    // Tests CLI parsing with no arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.size, DEFAULT_GRID_SIZE);
        assert_eq!(cli.shape, GridShape::Square);
        assert_eq!(cli.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(cli.count, 1);
        assert!(cli.seed.is_none());
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert_eq!(cli.dimensions(), (5, 5));
    }

    // Tests CLI parsing with the generation arguments
    // Verified by ignoring the column override
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "--size",
            "4",
            "--shape",
            "horizontal",
            "--rows",
            "3",
            "--seed",
            "99",
            "--weighted",
            "--tolerance",
            "2.5",
            "--tile-size",
            "50",
            "--no-composite",
            "--count",
            "3",
            "--quiet",
            "--no-skip",
        ]);

        assert_eq!(cli.dimensions(), (6, 3));
        assert_eq!(cli.seed, Some(99));
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());

        let config = cli.session_config();
        assert_eq!(config.selection, SelectionMode::Weighted);
        assert_eq!(config.tolerance, 2.5);
        assert_eq!(config.output_tile_size, 50.0);
        assert!(!config.composite);
    }

    // Tests output names carry dimensions and seed inside the output directory
    // Verified by dropping the seed from the file name
    #[test]
    fn test_output_path_naming() {
        let in_dir = MosaicProcessor::new(Cli::parse_from(["program", "-o", "out", "-c", "2"]));
        assert_eq!(
            in_dir.output_path(5, 8, 17),
            std::path::Path::new("out").join("truchet_mosaic_5x8_17.svg")
        );

        let single = MosaicProcessor::new(Cli::parse_from(["program", "-o", "art.svg"]));
        assert_eq!(single.output_path(5, 5, 1), std::path::PathBuf::from("art.svg"));
    }

    // Tests a batch writes one document per consecutive seed
    // Verified by reusing the first seed for every mosaic
    #[test]
    fn test_process_writes_batch() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "program", "-S", "2", "-s", "10", "-c", "2", "-q", "-d", "-o", output.as_str(),
        ]);

        let written = MosaicProcessor::new(cli).process().expect("batch succeeds");

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("truchet_mosaic_2x2_10.svg").exists());
        assert!(dir.path().join("truchet_mosaic_2x2_11.svg").exists());
        let display_list = fs::read_to_string(dir.path().join("truchet_mosaic_2x2_10.json"))
            .expect("display list written");
        assert!(display_list.contains("\"op\": \"fill_rect\""));
    }

    // Tests existing outputs are skipped unless asked otherwise
    // Verified by inverting skip_existing
    #[test]
    fn test_process_skips_existing() {
        let dir = TempDir::new().expect("temp dir");
        let existing = dir.path().join("truchet_mosaic_2x2_3.svg");
        fs::write(&existing, "keep").expect("write placeholder");
        let output = dir.path().to_string_lossy().to_string();

        let cli = Cli::parse_from(["program", "-S", "2", "-s", "3", "-q", "-o", output.as_str()]);
        let written = MosaicProcessor::new(cli).process().expect("processing succeeds");
        assert!(written.is_empty());
        assert_eq!(fs::read_to_string(&existing).expect("readable"), "keep");

        let cli = Cli::parse_from(["program", "-S", "2", "-s", "3", "-q", "-n", "-o", output.as_str()]);
        let written = MosaicProcessor::new(cli).process().expect("processing succeeds");
        assert_eq!(written.len(), 1);
        assert!(fs::read_to_string(&existing).expect("readable").starts_with("<?xml"));
    }

    // Tests a library with malformed primitives still renders its valid shapes
    // Verified by failing the batch when a tile has skipped primitives
    #[test]
    fn test_process_tolerates_malformed_primitives() {
        let dir = TempDir::new().expect("temp dir");
        let mut tile = TileDesign::classic();
        tile.shapes.beziers.push(vec![Point::new(0.0, 0.0); 2]);
        let library_path = dir.path().join("library.json");
        save_library(&library_path, &TileLibrary::new(vec![tile])).expect("library saved");
        let svg = dir.path().join("mosaic.svg");
        let library_arg = library_path.to_string_lossy().to_string();
        let output = svg.to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "program", "-S", "2", "-s", "5", "-t", library_arg.as_str(), "-o", output.as_str(),
        ]);
        let written = MosaicProcessor::new(cli).process().expect("processing succeeds");

        assert_eq!(written, vec![svg.clone()]);
        assert!(fs::read_to_string(&svg).expect("readable").contains("<path"));
    }

    // Tests invalid arguments are reported before anything is written
    // Verified by removing the count check
    #[test]
    fn test_process_rejects_invalid_arguments() {
        let cli = Cli::parse_from(["program", "-c", "0", "-q"]);
        assert!(MosaicProcessor::new(cli).process().is_err());

        let cli = Cli::parse_from(["program", "--cols", "0", "-q"]);
        assert!(MosaicProcessor::new(cli).process().is_err());

        let cli = Cli::parse_from(["program", "-t", "/nonexistent/library.json", "-q"]);
        assert!(MosaicProcessor::new(cli).process().is_err());
    }
}
