//! Tile URL sources for base layers

pub mod source;

// Re-exports for convenience
pub use source::{TileSource, UrlTemplateSource};
