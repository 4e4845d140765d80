//! Tile designs, their geometric primitives and stroke styles
//!
//! A tile design is drawn in a `DESIGN_SIZE` square. Its primitives are kept
//! in the loose serialized shape (lists of point lists) so that libraries
//! written by other tools round-trip unchanged; [`TileShapes::primitives`]
//! turns them into the strongly typed [`Primitive`] form and drops anything
//! malformed along the way.

use crate::io::configuration::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_PRIMARY_COLOR, DEFAULT_PROBABILITY,
    DEFAULT_SECONDARY_COLOR, DEFAULT_SECONDARY_WIDTH, DEFAULT_STROKE_WEIGHT, DEFAULT_TILE_NAME,
};
use crate::math::geometry::{Point, quad_to_cubic};
use crate::spatial::next_generation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// CSS hex colour as written in tile libraries (`#rgb` or `#rrggbb`)
///
/// Colours are compared by exact string equality, so `#fff` and `#FFFFFF`
/// are different stroke styles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Wrap a colour string without validation
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse a colour, accepting only `#rgb` and `#rrggbb` forms
    pub fn parse(value: &str) -> Option<Self> {
        let color = Self::new(value);
        color.is_valid().then_some(color)
    }

    /// Check whether the colour is a well-formed hex colour
    pub fn is_valid(&self) -> bool {
        self.0.strip_prefix('#').is_some_and(|digits| {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        })
    }

    /// Borrow the colour string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A geometric primitive of a tile in tile-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// A single coordinate drawn as a filled disc
    Point(Point),
    /// Quadratic Bézier: start, control, end
    Quad([Point; 3]),
    /// Cubic Bézier: start, first control, second control, end
    Cubic([Point; 4]),
}

impl Primitive {
    /// Control points in the uniform representation used downstream
    ///
    /// Points stay single, quads are elevated to four-point cubics.
    pub fn uniform_points(&self) -> Vec<Point> {
        match *self {
            Self::Point(point) => vec![point],
            Self::Quad(quad) => quad_to_cubic(quad).to_vec(),
            Self::Cubic(cubic) => cubic.to_vec(),
        }
    }
}

/// Serialized primitives of a tile, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileShapes {
    /// Isolated points
    #[serde(default)]
    pub points: Vec<Point>,
    /// Quadratic curves, three points each when well-formed
    #[serde(default)]
    pub quads: Vec<Vec<Point>>,
    /// Cubic curves, four points each when well-formed
    #[serde(default)]
    pub beziers: Vec<Vec<Point>>,
}

impl TileShapes {
    /// Typed primitives in drawing order: points, then quads, then cubics
    ///
    /// Entries with the wrong number of points or a non-finite coordinate are
    /// skipped; the rest of the tile is still returned.
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut primitives =
            Vec::with_capacity(self.points.len() + self.quads.len() + self.beziers.len());

        for (index, &point) in self.points.iter().enumerate() {
            if point.is_finite() {
                primitives.push(Primitive::Point(point));
            } else {
                log::warn!("Skipping point {index}: non-finite coordinate {point}");
            }
        }

        for (index, quad) in self.quads.iter().enumerate() {
            match exact_points::<3>(quad) {
                Some(points) => primitives.push(Primitive::Quad(points)),
                None => log::warn!(
                    "Skipping quad {index}: expected 3 finite points, found {}",
                    quad.len()
                ),
            }
        }

        for (index, cubic) in self.beziers.iter().enumerate() {
            match exact_points::<4>(cubic) {
                Some(points) => primitives.push(Primitive::Cubic(points)),
                None => log::warn!(
                    "Skipping bezier {index}: expected 4 finite points, found {}",
                    cubic.len()
                ),
            }
        }

        primitives
    }

    /// Number of entries [`TileShapes::primitives`] leaves out
    pub fn malformed_count(&self) -> usize {
        self.points.iter().filter(|point| !point.is_finite()).count()
            + self
                .quads
                .iter()
                .filter(|quad| exact_points::<3>(quad).is_none())
                .count()
            + self
                .beziers
                .iter()
                .filter(|cubic| exact_points::<4>(cubic).is_none())
                .count()
    }

    /// Check whether the tile draws nothing
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.quads.is_empty() && self.beziers.is_empty()
    }
}

fn exact_points<const N: usize>(points: &[Point]) -> Option<[Point; N]> {
    let array = <[Point; N]>::try_from(points).ok()?;
    array.iter().all(|point| point.is_finite()).then_some(array)
}

/// Stroke style tuple that decides which segments may be stitched together
///
/// Weights compare bitwise so the key can live in a hash map.
#[derive(Debug, Clone)]
pub struct StyleKey {
    /// Foreground stroke colour
    pub primary_color: Color,
    /// Foreground stroke weight
    pub primary_weight: f64,
    /// Background stroke colour
    pub secondary_color: Color,
    /// Extra width of the background stroke around the foreground stroke
    pub secondary_width: f64,
}

impl StyleKey {
    /// Full width of the background stroke
    pub const fn secondary_total_weight(&self) -> f64 {
        self.primary_weight + self.secondary_width
    }
}

// Adding zero folds -0.0 into 0.0 so both weights land in the same group
const fn weight_bits(weight: f64) -> u64 {
    (weight + 0.0).to_bits()
}

impl PartialEq for StyleKey {
    fn eq(&self, other: &Self) -> bool {
        self.primary_color == other.primary_color
            && weight_bits(self.primary_weight) == weight_bits(other.primary_weight)
            && self.secondary_color == other.secondary_color
            && weight_bits(self.secondary_width) == weight_bits(other.secondary_width)
    }
}

impl Eq for StyleKey {}

impl Hash for StyleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.primary_color.hash(state);
        weight_bits(self.primary_weight).hash(state);
        self.secondary_color.hash(state);
        weight_bits(self.secondary_width).hash(state);
    }
}

fn default_name() -> String {
    DEFAULT_TILE_NAME.to_string()
}

fn default_background() -> Color {
    Color::new(DEFAULT_BACKGROUND_COLOR)
}

fn default_primary() -> Color {
    Color::new(DEFAULT_PRIMARY_COLOR)
}

fn default_secondary() -> Color {
    Color::new(DEFAULT_SECONDARY_COLOR)
}

const fn default_stroke_weight() -> f64 {
    DEFAULT_STROKE_WEIGHT
}

const fn default_secondary_width() -> f64 {
    DEFAULT_SECONDARY_WIDTH
}

const fn default_probability() -> f64 {
    DEFAULT_PROBABILITY
}

/// A named tile design with its primitives and stroke style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDesign {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,
    /// Geometric primitives in tile-local coordinates
    #[serde(default)]
    pub shapes: TileShapes,
    /// Fill of the tile square behind the strokes
    #[serde(default = "default_background")]
    pub background_color: Color,
    /// Foreground stroke colour
    #[serde(default = "default_primary")]
    pub primary_color: Color,
    /// Background stroke colour
    #[serde(default = "default_secondary")]
    pub secondary_color: Color,
    /// Foreground stroke weight
    #[serde(default = "default_stroke_weight")]
    pub stroke_weight: f64,
    /// Extra width of the background stroke around the foreground stroke
    #[serde(default = "default_secondary_width", rename = "secondaryStrokeWidth")]
    pub secondary_width: f64,
    /// Draw each shape's background and foreground together instead of in two passes
    #[serde(default)]
    pub layered_rendering: bool,
    /// Relative weight used by weighted tile selection
    #[serde(default = "default_probability")]
    pub probability: f64,
}

impl Default for TileDesign {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_NAME, TileShapes::default())
    }
}

impl TileDesign {
    /// Create a tile with default colours, weights and probability
    pub fn new(name: impl Into<String>, shapes: TileShapes) -> Self {
        Self {
            name: name.into(),
            shapes,
            background_color: default_background(),
            primary_color: default_primary(),
            secondary_color: default_secondary(),
            stroke_weight: DEFAULT_STROKE_WEIGHT,
            secondary_width: DEFAULT_SECONDARY_WIDTH,
            layered_rendering: false,
            probability: DEFAULT_PROBABILITY,
        }
    }

    /// Stroke style shared by every segment of this tile
    pub fn style_key(&self) -> StyleKey {
        StyleKey {
            primary_color: self.primary_color.clone(),
            primary_weight: self.stroke_weight,
            secondary_color: self.secondary_color.clone(),
            secondary_width: self.secondary_width,
        }
    }

    /// Well-formed primitives of this tile
    pub fn primitives(&self) -> Vec<Primitive> {
        self.shapes.primitives()
    }

    /// Classic Truchet tile: left-to-top and bottom-to-right arcs
    pub fn classic() -> Self {
        let quads = vec![
            vec![
                Point::new(0.0, 300.0),
                Point::new(300.0, 300.0),
                Point::new(300.0, 0.0),
            ],
            vec![
                Point::new(300.0, 600.0),
                Point::new(300.0, 300.0),
                Point::new(600.0, 300.0),
            ],
        ];
        Self::with_builtin_style("Classic", quads)
    }

    /// Cross tile: four arcs joining every pair of adjacent edge midpoints
    pub fn cross() -> Self {
        let quads = vec![
            vec![
                Point::new(300.0, 0.0),
                Point::new(300.0, 300.0),
                Point::new(600.0, 300.0),
            ],
            vec![
                Point::new(600.0, 300.0),
                Point::new(300.0, 300.0),
                Point::new(300.0, 600.0),
            ],
            vec![
                Point::new(300.0, 600.0),
                Point::new(300.0, 300.0),
                Point::new(0.0, 300.0),
            ],
            vec![
                Point::new(0.0, 300.0),
                Point::new(300.0, 300.0),
                Point::new(300.0, 0.0),
            ],
        ];
        Self::with_builtin_style("Cross", quads)
    }

    fn with_builtin_style(name: &str, quads: Vec<Vec<Point>>) -> Self {
        Self {
            name: name.to_string(),
            shapes: TileShapes {
                quads,
                ..TileShapes::default()
            },
            background_color: Color::new("#FEF3C7"),
            primary_color: Color::new("#14B8A6"),
            secondary_color: Color::new("#F97316"),
            stroke_weight: 50.0,
            secondary_width: 30.0,
            layered_rendering: false,
            probability: 1.0,
        }
    }
}

/// Ordered list of tile designs referenced by index from grid cells
///
/// Every mutation stamps a fresh generation so caches keyed on the library
/// notice the change.
#[derive(Debug, Clone)]
pub struct TileLibrary {
    tiles: Vec<TileDesign>,
    generation: u64,
}

impl Default for TileLibrary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<TileDesign>> for TileLibrary {
    fn from(tiles: Vec<TileDesign>) -> Self {
        Self::new(tiles)
    }
}

impl TileLibrary {
    /// Wrap a list of tiles
    pub fn new(tiles: Vec<TileDesign>) -> Self {
        Self {
            tiles,
            generation: next_generation(),
        }
    }

    /// The two built-in designs, Classic and Cross
    pub fn builtin() -> Self {
        Self::new(vec![TileDesign::classic(), TileDesign::cross()])
    }

    /// Generation stamp of the current contents
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check whether the library holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Borrow all tiles in order
    pub fn tiles(&self) -> &[TileDesign] {
        &self.tiles
    }

    /// Look up a tile by index
    pub fn get(&self, index: usize) -> Option<&TileDesign> {
        self.tiles.get(index)
    }

    /// Mutably borrow a tile; the library counts this as a mutation
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TileDesign> {
        self.touch();
        self.tiles.get_mut(index)
    }

    /// Append a tile and return its index
    pub fn push(&mut self, tile: TileDesign) -> usize {
        self.touch();
        self.tiles.push(tile);
        self.tiles.len() - 1
    }

    /// Remove a tile; later indices shift down and grid cells may go stale
    pub fn remove(&mut self, index: usize) -> Option<TileDesign> {
        (index < self.tiles.len()).then(|| {
            self.touch();
            self.tiles.remove(index)
        })
    }

    /// Selection weights in tile order
    pub fn probabilities(&self) -> Vec<f64> {
        self.tiles.iter().map(|tile| tile.probability).collect()
    }

    /// Consume the library and return its tiles
    pub fn into_tiles(self) -> Vec<TileDesign> {
        self.tiles
    }

    fn touch(&mut self) {
        self.generation = next_generation();
    }
}
