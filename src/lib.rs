//! # spotmap
//!
//! Headless controller for an interactive map of geotagged "spots".
//!
//! The crate owns everything a spot-map page needs apart from pixels: loading
//! `spots.json`, a 1:1 marker registry with clustering, substring search with
//! suggestion and apply modes, geolocation with a single retry, and the view
//! models for the details panel, marker popups and static detail pages.
//! Hosts plug in through the [`ui::surface::PageSurface`] and
//! [`geolocation::source::PositionSource`] traits.

pub mod animation;
pub mod core;
pub mod data;
pub mod geolocation;
pub mod layers;
pub mod prelude;
pub mod search;
pub mod spatial;
pub mod tiles;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::MapPageConfig,
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::MapPage,
    viewport::Viewport,
};

pub use data::{
    loader::SpotLoader,
    spot::{Spot, SpotKey, SpotStore},
};

pub use layers::{
    cluster::MarkerClusterGroup,
    marker::Marker,
    registry::{MarkerEntry, MarkerHandle, MarkerRegistry},
    tile::TileLayer,
};

pub use geolocation::{
    controller::{GeolocationController, GeolocationState, LocateOutcome},
    source::{Position, PositionError, PositionOptions, PositionSource},
};

pub use search::{FilterMode, FilterResult, SearchEngine};

pub use ui::{
    detail::{DetailError, DetailPage},
    panel::PanelContent,
    popup::PopupContent,
    surface::{NullSurface, PageSurface},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
