use crate::data::{
    links::{detail_page_path, google_directions_url},
    spot::Spot,
};

/// Contents of the details panel for the selected spot.
///
/// `None` fields are hidden by the surface instead of showing an empty placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub title: String,
    /// Category with a leading `#`
    pub category: Option<String>,
    pub area: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub external_url: Option<String>,
    /// Google Maps directions, or the spot's own `google_url`
    pub route_url: Option<String>,
    /// Relative link to the static detail page, only for spots with an id
    pub detail_url: Option<String>,
}

impl PanelContent {
    pub fn from_spot(spot: &Spot) -> Self {
        Self {
            title: spot.display_name().to_string(),
            category: spot.category().map(|c| format!("#{c}")),
            area: spot.area(),
            description: spot.description().map(str::to_string),
            image: spot.image().map(str::to_string),
            external_url: spot.url().map(str::to_string),
            route_url: google_directions_url(spot),
            detail_url: spot.spot_id().map(detail_page_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_panel() {
        let spot = Spot {
            spot_id: Some("kochi 1".to_string()),
            name: Some("高知城".to_string()),
            category: Some("城".to_string()),
            prefecture: Some("高知県".to_string()),
            municipality: Some("高知市".to_string()),
            lat: Some(33.5608),
            lng: Some(133.5314),
            ..Default::default()
        };
        let panel = PanelContent::from_spot(&spot);

        assert_eq!(panel.title, "高知城");
        assert_eq!(panel.category.as_deref(), Some("#城"));
        assert_eq!(panel.area.as_deref(), Some("高知県 高知市"));
        assert_eq!(
            panel.route_url.as_deref(),
            Some("https://www.google.com/maps/dir/?api=1&destination=33.5608,133.5314")
        );
        assert_eq!(panel.detail_url.as_deref(), Some("spot/kochi%201.html"));
    }

    #[test]
    fn test_sparse_panel_hides_fields() {
        let panel = PanelContent::from_spot(&Spot {
            name: Some("Somewhere".to_string()),
            ..Default::default()
        });

        assert_eq!(panel.category, None);
        assert_eq!(panel.area, None);
        assert_eq!(panel.description, None);
        assert_eq!(panel.route_url, None);
        assert_eq!(panel.detail_url, None);
    }
}
