//! Map layers: base tiles, spot markers and the marker registry

pub mod base;
pub mod cluster;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod registry;
pub mod tile;
