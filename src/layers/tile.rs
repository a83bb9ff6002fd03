use crate::{
    core::{
        geo::{LatLng, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    tiles::source::{TileSource, UrlTemplateSource},
};

/// A base layer backed by a public tile server
pub struct TileLayer {
    properties: LayerProperties,
    source: Box<dyn TileSource>,
}

impl TileLayer {
    pub fn new(id: String, name: String, source: Box<dyn TileSource>) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            source,
        }
    }

    /// Create a new tile layer with default OpenStreetMap tiles
    pub fn openstreetmap(id: String, name: String) -> Self {
        Self::new(id, name, Box::new(UrlTemplateSource::openstreetmap()))
    }

    pub fn gsi_standard(id: String, name: String) -> Self {
        Self::new(id, name, Box::new(UrlTemplateSource::gsi_standard()))
    }

    pub fn gsi_pale(id: String, name: String) -> Self {
        Self::new(id, name, Box::new(UrlTemplateSource::gsi_pale()))
    }

    pub fn gsi_photo(id: String, name: String) -> Self {
        Self::new(id, name, Box::new(UrlTemplateSource::gsi_photo()))
    }

    pub fn opentopomap(id: String, name: String) -> Self {
        Self::new(id, name, Box::new(UrlTemplateSource::opentopomap()))
    }

    /// The base layers offered by the page, OpenStreetMap first
    pub fn defaults() -> Vec<TileLayer> {
        vec![
            Self::openstreetmap("osm".to_string(), "OpenStreetMap".to_string()),
            Self::gsi_standard("gsi-std".to_string(), "地理院地図 標準".to_string()),
            Self::gsi_pale("gsi-pale".to_string(), "地理院地図 淡色".to_string()),
            Self::gsi_photo("gsi-photo".to_string(), "地理院地図 写真".to_string()),
            Self::opentopomap("otm".to_string(), "OpenTopoMap".to_string()),
        ]
    }

    pub fn attribution(&self) -> &str {
        self.source.attribution()
    }

    /// Tiles covering the viewport at its (floored) zoom
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileCoord> {
        let zoom = viewport.zoom.floor().clamp(0.0, self.source.max_zoom() as f64) as u8;
        let bounds = viewport.bounds();
        let max_index = 2_u32.pow(zoom as u32) - 1;

        let nw = TileCoord::from_lat_lng(
            &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
            zoom,
        );
        let se = TileCoord::from_lat_lng(
            &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
            zoom,
        );

        let mut tiles = Vec::new();
        for y in nw.y.min(max_index)..=se.y.min(max_index) {
            for x in nw.x.min(max_index)..=se.x.min(max_index) {
                tiles.push(TileCoord::new(x, y, zoom));
            }
        }
        tiles
    }

    pub fn tile_urls(&self, viewport: &Viewport) -> Vec<String> {
        self.visible_tiles(viewport)
            .into_iter()
            .map(|coord| self.source.url(coord))
            .collect()
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "attribution": self.source.attribution(),
            "max_zoom": self.source.max_zoom(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let layer = TileLayer::openstreetmap("osm".to_string(), "OpenStreetMap".to_string());
        let viewport = Viewport::new(LatLng::new(33.8, 133.4), 8.0, Point::new(800.0, 600.0));

        let tiles = layer.visible_tiles(&viewport);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == 8 && t.is_valid()));
        assert!(tiles.contains(&TileCoord::from_lat_lng(&viewport.center, 8)));

        let urls = layer.tile_urls(&viewport);
        assert_eq!(urls.len(), tiles.len());
        assert!(urls[0].starts_with("https://"));
    }

    #[test]
    fn test_default_layers() {
        let layers = TileLayer::defaults();
        assert_eq!(layers[0].id(), "osm");
        assert_eq!(layers[0].attribution(), "© OpenStreetMap contributors");
        assert_eq!(layers.len(), 5);
    }
}
