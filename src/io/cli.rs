//! Command-line interface for generating batches of mosaic documents

use crate::algorithm::session::{MosaicSession, SessionConfig};
use crate::io::configuration::{
    DEFAULT_GRID_SIZE, DEFAULT_OUTPUT_TILE_SIZE, DEFAULT_TOLERANCE, OUTPUT_PREFIX,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::library::load_library;
use crate::io::progress::{ProgressManager, Stage};
use crate::render::surface::RecordingSurface;
use crate::spatial::grid::{GridShape, MosaicGrid, SelectionMode};
use crate::spatial::tiles::TileLibrary;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "truchet-mosaic")]
#[command(
    author,
    version,
    about = "Generate Truchet tile mosaics as stitched SVG documents"
)]
/// Command-line arguments for the mosaic generator
///
/// Primitives skipped from a loaded tile library are reported on stderr
/// unless `--quiet` is set. Finer diagnostics go through the `log` facade and
/// only appear when the embedding program installs a logger.
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tiles along the shorter side of the grid
    #[arg(short = 'S', long, default_value_t = DEFAULT_GRID_SIZE)]
    pub size: usize,

    /// Aspect of the grid
    #[arg(long, value_enum, default_value_t = GridShape::Square)]
    pub shape: GridShape,

    /// Number of columns, overriding size and shape
    #[arg(long)]
    pub cols: Option<usize>,

    /// Number of rows, overriding size and shape
    #[arg(long)]
    pub rows: Option<usize>,

    /// Seed of the first mosaic; drawn at random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Pick tiles in proportion to their probability instead of uniformly
    #[arg(short, long)]
    pub weighted: bool,

    /// Tile library JSON file; the built-in Classic and Cross tiles otherwise
    #[arg(short, long, value_name = "LIBRARY")]
    pub tiles: Option<PathBuf>,

    /// Endpoint distance under which segments are stitched, in design units
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Edge length of one tile in the output document
    #[arg(long, default_value_t = DEFAULT_OUTPUT_TILE_SIZE)]
    pub tile_size: f64,

    /// Export tiles individually instead of stitched paths
    #[arg(long)]
    pub no_composite: bool,

    /// Number of mosaics to generate with consecutive seeds
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Output directory, or a `.svg` file when generating a single mosaic
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the draw commands of each mosaic as JSON
    #[arg(short, long)]
    pub display_list: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write mosaics even if the output file exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid dimensions after applying overrides
    pub fn dimensions(&self) -> (usize, usize) {
        let (cols, rows) = self.shape.dimensions(self.size);
        (self.cols.unwrap_or(cols), self.rows.unwrap_or(rows))
    }

    /// Session settings described by the arguments
    pub fn session_config(&self) -> SessionConfig {
        let (cols, rows) = self.dimensions();
        SessionConfig {
            cols,
            rows,
            selection: if self.weighted {
                SelectionMode::Weighted
            } else {
                SelectionMode::Uniform
            },
            tolerance: self.tolerance,
            composite: !self.no_composite,
            output_tile_size: self.tile_size,
        }
    }
}

/// Generates and writes mosaics according to the CLI arguments
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and write every requested mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the tile library
    /// cannot be loaded or an output file cannot be written
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        if self.cli.count == 0 {
            return Err(invalid_parameter(
                "count",
                &self.cli.count,
                &"at least one mosaic must be generated",
            ));
        }

        let library = match &self.cli.tiles {
            Some(path) => load_library(path)?,
            None => TileLibrary::builtin(),
        };
        if !self.cli.quiet {
            report_malformed(&library);
        }
        let first_seed = self.cli.seed.unwrap_or_else(MosaicGrid::random_seed);
        let mut session = MosaicSession::new(library, self.cli.session_config(), first_seed)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        let mut written = Vec::new();
        for index in 0..self.cli.count {
            let seed = first_seed.wrapping_add(index as u64);
            if let Some(path) = self.process_mosaic(&mut session, index, seed)? {
                written.push(path);
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    // Allow print for user feedback for skipped files
    #[allow(clippy::print_stderr)]
    fn process_mosaic(
        &mut self,
        session: &mut MosaicSession,
        index: usize,
        seed: u64,
    ) -> Result<Option<PathBuf>> {
        let (cols, rows) = self.cli.dimensions();
        let output_path = self.output_path(cols, rows, seed);
        if self.cli.skip_existing() && output_path.exists() {
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", output_path.display());
            }
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete(index);
            }
            return Ok(None);
        }

        let name = file_name(&output_path);
        if let Some(ref mut pm) = self.progress_manager {
            pm.set_stage(index, &name, Stage::Generate);
        }
        if session.grid().seed() != seed {
            session.regenerate(seed);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.set_stage(index, &name, Stage::Stitch);
        }
        let document = session.svg_document();

        if let Some(ref mut pm) = self.progress_manager {
            pm.set_stage(index, &name, Stage::Write);
        }
        if let Some(parent) = output_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|source| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create output directory",
                source,
            })?;
        }
        write_file(&output_path, &document)?;

        if self.cli.display_list {
            let mut surface = RecordingSurface::new();
            session.render(&mut surface)?;
            let json = serde_json::to_string_pretty(&surface.commands).map_err(|source| {
                MosaicError::Serialization {
                    what: "display list",
                    source,
                }
            })?;
            write_file(&output_path.with_extension("json"), &json)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete(index);
        }
        log::debug!("Wrote {}", output_path.display());

        Ok(Some(output_path))
    }

    /// Where the mosaic for `seed` is written
    ///
    /// A single mosaic honours an explicit `.svg` output path; everything
    /// else is named `truchet_mosaic_{cols}x{rows}_{seed}.svg` inside the
    /// output directory (the working directory by default).
    pub fn output_path(&self, cols: usize, rows: usize, seed: u64) -> PathBuf {
        let name = format!("{OUTPUT_PREFIX}_{cols}x{rows}_{seed}.svg");
        match &self.cli.output {
            Some(path) if self.cli.count == 1 && is_svg_file(path) => path.clone(),
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

fn is_svg_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("svg"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "write output",
        source,
    })
}

// Allow print so skipped primitives are visible without a logger
#[allow(clippy::print_stderr)]
fn report_malformed(library: &TileLibrary) {
    for tile in library.tiles() {
        let skipped = tile.shapes.malformed_count();
        if skipped > 0 {
            eprintln!(
                "Warning: tile '{}' has {skipped} malformed primitive(s), skipped",
                tile.name
            );
        }
    }
}
