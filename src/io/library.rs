//! Tile library files
//!
//! A library is JSON holding either a bare array of tile designs or an
//! object with a `tiles` array, which is the shape project files use. Fields
//! missing from a tile take the library defaults.

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::tiles::{Color, TileDesign, TileLibrary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum LibraryFile {
    Bare(Vec<TileDesign>),
    Project { tiles: Vec<TileDesign> },
}

#[derive(Serialize)]
struct LibraryFileRef<'a> {
    tiles: &'a [TileDesign],
}

/// Parse and validate a library from JSON text
///
/// # Errors
///
/// Returns `LibraryLoad` if the text is not a library, `InvalidParameter`
/// if a tile fails validation and `EmptyTileLibrary` if no tiles are listed
pub fn parse_library(json: &str, path: &Path) -> Result<TileLibrary> {
    let file: LibraryFile = serde_json::from_str(json).map_err(|source| MosaicError::LibraryLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let tiles = match file {
        LibraryFile::Bare(tiles) | LibraryFile::Project { tiles } => tiles,
    };
    if tiles.is_empty() {
        return Err(MosaicError::EmptyTileLibrary);
    }
    for tile in &tiles {
        validate_tile(tile)?;
    }

    log::debug!("Loaded {} tiles from {}", tiles.len(), path.display());
    Ok(TileLibrary::new(tiles))
}

/// Read a library file from disk
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, otherwise the errors of
/// [`parse_library`]
pub fn load_library(path: &Path) -> Result<TileLibrary> {
    let json = fs::read_to_string(path).map_err(|source| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "read tile library",
        source,
    })?;
    parse_library(&json, path)
}

/// Write a library as a pretty-printed `{"tiles": [...]}` object
///
/// # Errors
///
/// Returns `Serialization` if encoding fails and `FileSystem` if the file
/// cannot be written
pub fn save_library(path: &Path, library: &TileLibrary) -> Result<()> {
    let json = serde_json::to_string_pretty(&LibraryFileRef {
        tiles: library.tiles(),
    })
    .map_err(|source| MosaicError::Serialization {
        what: "tile library",
        source,
    })?;

    fs::write(path, json).map_err(|source| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "write tile library",
        source,
    })
}

/// Check colours, stroke widths and probability of one tile
///
/// Shapes are not checked here; malformed primitives are skipped when the
/// tile is drawn.
///
/// # Errors
///
/// Returns `InvalidParameter` naming the first offending field
pub fn validate_tile(tile: &TileDesign) -> Result<()> {
    validate_color("backgroundColor", &tile.background_color)?;
    validate_color("primaryColor", &tile.primary_color)?;
    validate_color("secondaryColor", &tile.secondary_color)?;
    validate_non_negative("strokeWeight", tile.stroke_weight)?;
    validate_non_negative("secondaryStrokeWidth", tile.secondary_width)?;
    validate_non_negative("probability", tile.probability)
}

fn validate_color(parameter: &'static str, color: &Color) -> Result<()> {
    if color.is_valid() {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            color,
            &"expected a #rgb or #rrggbb colour",
        ))
    }
}

fn validate_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &"must be a finite, non-negative number",
        ))
    }
}
