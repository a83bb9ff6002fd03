use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerProperties, LayerTrait},
    ui::popup::PopupContent,
};

/// A single point marker with an optional title and popup
#[derive(Debug, Clone)]
pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    title: Option<String>,
    popup: Option<PopupContent>,
    popup_open: bool,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(
            id,
            "Marker".to_string(),
            crate::layers::base::LayerType::Marker,
        );
        Self {
            properties,
            position,
            title: None,
            popup: None,
            popup_open: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_popup(mut self, popup: PopupContent) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn popup(&self) -> Option<&PopupContent> {
        self.popup.as_ref()
    }

    pub fn open_popup(&mut self) {
        self.popup_open = self.popup.is_some();
    }

    pub fn close_popup(&mut self) {
        self.popup_open = false;
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "title": self.title,
            "popup": self.popup.as_ref().map(|p| p.title.clone())
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}
