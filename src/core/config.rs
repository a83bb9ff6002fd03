//! Configuration for a spot map page
//!
//! Every section is optional in the JSON document; missing fields fall back to
//! the defaults in [`crate::core::constants`].

use crate::core::constants::{
    DEFAULT_DATA_URL, DEFAULT_VIEWPORT_SIZE, DISABLE_CLUSTERING_AT_ZOOM, FLY_TO_DURATION_MS,
    FOCUS_ZOOM, GEOLOCATION_RETRY_TIMEOUT_MS, GEOLOCATION_TIMEOUT_MS, HOME_NORTH_EAST,
    HOME_PADDING, HOME_SOUTH_WEST, LOCATE_ZOOM, MAX_CLUSTER_RADIUS, SUGGESTION_LIMIT,
};
use crate::core::geo::{LatLngBounds, Point};
use crate::geolocation::source::PositionOptions;
use crate::prelude::Duration;
use crate::spatial::clustering::ClusteringConfig;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapPageConfig {
    /// Location of `spots.json`, an http(s) URL or a file path
    pub data_url: String,
    pub home: HomeView,
    pub search: SearchConfig,
    pub geolocation: GeolocationConfig,
    pub clustering: ClusterOptions,
    /// Id of the base layer shown at startup
    pub base_layer: String,
    /// Map container size in CSS pixels
    pub viewport_size: (f64, f64),
}

impl Default for MapPageConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            home: HomeView::default(),
            search: SearchConfig::default(),
            geolocation: GeolocationConfig::default(),
            clustering: ClusterOptions::default(),
            base_layer: "osm".to_string(),
            viewport_size: DEFAULT_VIEWPORT_SIZE,
        }
    }
}

impl MapPageConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = self.home.bounds();
        if bounds.south_west.lat > bounds.north_east.lat
            || bounds.south_west.lng > bounds.north_east.lng
        {
            return Err(MapError::Config(
                "home bounds must be given as [south, west] and [north, east]".to_string(),
            ));
        }
        if self.search.suggestion_limit == 0 {
            return Err(MapError::Config("suggestion_limit must be at least 1".to_string()));
        }
        if self.geolocation.timeout_ms == 0 || self.geolocation.retry_timeout_ms == 0 {
            return Err(MapError::Config("geolocation timeouts must be positive".to_string()));
        }
        if self.viewport_size.0 <= 0.0 || self.viewport_size.1 <= 0.0 {
            return Err(MapError::Config("viewport size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn viewport_size(&self) -> Point {
        Point::new(self.viewport_size.0, self.viewport_size.1)
    }
}

/// The fixed view the map starts in and returns to when the filter is cleared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeView {
    pub south_west: (f64, f64),
    pub north_east: (f64, f64),
    pub padding: f64,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            south_west: HOME_SOUTH_WEST,
            north_east: HOME_NORTH_EAST,
            padding: HOME_PADDING,
        }
    }
}

impl HomeView {
    pub fn bounds(&self) -> LatLngBounds {
        LatLngBounds::from_coords(
            self.south_west.0,
            self.south_west.1,
            self.north_east.0,
            self.north_east.1,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub suggestion_limit: usize,
    /// Minimum zoom after flying to the first match
    pub focus_zoom: f64,
    pub fly_duration_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: SUGGESTION_LIMIT,
            focus_zoom: FOCUS_ZOOM,
            fly_duration_ms: FLY_TO_DURATION_MS,
        }
    }
}

impl SearchConfig {
    pub fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub timeout_ms: u64,
    pub retry_timeout_ms: u64,
    pub high_accuracy: bool,
    pub locate_zoom: f64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            retry_timeout_ms: GEOLOCATION_RETRY_TIMEOUT_MS,
            high_accuracy: true,
            locate_zoom: LOCATE_ZOOM,
        }
    }
}

impl GeolocationConfig {
    /// Options of the first request of a trigger sequence
    pub fn initial_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.high_accuracy,
            timeout: Duration::from_millis(self.timeout_ms),
            maximum_age: Duration::ZERO,
        }
    }

    /// Options of the single retry
    pub fn retry_options(&self) -> PositionOptions {
        PositionOptions {
            timeout: Duration::from_millis(self.retry_timeout_ms),
            ..self.initial_options()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    pub max_cluster_radius: f64,
    pub disable_clustering_at_zoom: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_cluster_radius: MAX_CLUSTER_RADIUS,
            disable_clustering_at_zoom: DISABLE_CLUSTERING_AT_ZOOM,
        }
    }
}

impl From<&ClusterOptions> for ClusteringConfig {
    fn from(options: &ClusterOptions) -> Self {
        ClusteringConfig {
            grid_size: options.max_cluster_radius,
            disable_clustering_at_zoom: options.disable_clustering_at_zoom,
            ..ClusteringConfig::default()
        }
    }
}
