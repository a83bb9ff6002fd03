//! Prelude module for common spotmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use spotmap::prelude::*;`

pub use crate::core::{
    config::{ClusterOptions, GeolocationConfig, HomeView, MapPageConfig, SearchConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::MapPage,
    viewport::Viewport,
};

pub use crate::animation::transitions::{EasingType, ViewTransition};

pub use crate::data::{
    links::{detail_page_path, encode_uri_component, google_directions_url},
    loader::SpotLoader,
    spot::{Spot, SpotKey, SpotStore},
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    cluster::MarkerClusterGroup,
    manager::LayerManager,
    marker::Marker,
    registry::{MarkerEntry, MarkerHandle, MarkerRegistry},
    tile::TileLayer,
};

pub use crate::spatial::{
    clustering::{Cluster, Clustering, ClusteringConfig},
    index::{SpatialIndex, SpatialItem},
};

pub use crate::tiles::source::{TileSource, UrlTemplateSource};

pub use crate::geolocation::{
    controller::{GeolocationController, GeolocationState, LocateOutcome},
    source::{FixedPositionSource, Position, PositionError, PositionOptions, PositionSource},
};

pub use crate::search::{FilterMode, FilterResult, SearchEngine, Suggestion};

pub use crate::ui::{
    detail::{spot_id_from_query, DetailError, DetailPage},
    panel::PanelContent,
    popup::PopupContent,
    surface::{NullSurface, PageSurface},
};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
