use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    /// Attribution shown in the map corner.
    fn attribution(&self) -> &str;

    fn max_zoom(&self) -> u8 {
        18
    }
}

/// Leaflet-style `{s}/{z}/{x}/{y}` URL template over a public, unauthenticated tile server
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
    attribution: String,
    max_zoom: u8,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: Vec::new(),
            attribution: attribution.into(),
            max_zoom: 18,
        }
    }

    pub fn with_subdomains(mut self, subdomains: &[&str]) -> Self {
        self.subdomains = subdomains.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn openstreetmap() -> Self {
        Self::new(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors",
        )
        .with_subdomains(&["a", "b", "c"])
        .with_max_zoom(19)
    }

    pub fn gsi_standard() -> Self {
        Self::new(
            "https://cyberjapandata.gsi.go.jp/xyz/std/{z}/{x}/{y}.png",
            "地理院タイル",
        )
    }

    pub fn gsi_pale() -> Self {
        Self::new(
            "https://cyberjapandata.gsi.go.jp/xyz/pale/{z}/{x}/{y}.png",
            "地理院タイル",
        )
    }

    pub fn gsi_photo() -> Self {
        Self::new(
            "https://cyberjapandata.gsi.go.jp/xyz/seamlessphoto/{z}/{x}/{y}.jpg",
            "地理院タイル",
        )
    }

    pub fn opentopomap() -> Self {
        Self::new(
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors, SRTM | © OpenTopoMap (CC-BY-SA)",
        )
        .with_subdomains(&["a", "b", "c"])
        .with_max_zoom(17)
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x + coord.y) % self.subdomains.len() as u32) as usize;
            self.subdomains[idx].as_str()
        };

        self.template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    fn attribution(&self) -> &str {
        &self.attribution
    }

    fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}
