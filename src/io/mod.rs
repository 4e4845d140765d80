/// Command-line interface and batch processing
pub mod cli;
/// Pipeline constants and defaults
pub mod configuration;
/// Error types and validation helpers
pub mod error;
/// Tile library files
pub mod library;
/// Progress display for batch generation
pub mod progress;
