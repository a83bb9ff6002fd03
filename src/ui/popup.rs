use crate::data::spot::Spot;

/// What a spot marker's popup shows. Markup is left to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub category: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    /// External "more details" link
    pub url: Option<String>,
}

impl PopupContent {
    /// Popup holding a single line of text
    pub fn text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            image: None,
            description: None,
            url: None,
        }
    }

    pub fn from_spot(spot: &Spot) -> Self {
        Self {
            title: spot.display_name().to_string(),
            category: spot.category().map(str::to_string),
            image: spot.image().map(str::to_string),
            description: spot.description().map(str::to_string),
            url: spot.url().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::UNKNOWN_NAME;

    #[test]
    fn test_from_spot_hides_empty_fields() {
        let spot = Spot {
            name: Some("桂浜".to_string()),
            category: Some("景勝地".to_string()),
            description: Some(String::new()),
            url: Some("https://example.com/katsurahama".to_string()),
            ..Default::default()
        };
        let popup = PopupContent::from_spot(&spot);

        assert_eq!(popup.title, "桂浜");
        assert_eq!(popup.category.as_deref(), Some("景勝地"));
        assert_eq!(popup.description, None);
        assert_eq!(popup.image, None);
        assert_eq!(popup.url.as_deref(), Some("https://example.com/katsurahama"));
    }

    #[test]
    fn test_unnamed_spot() {
        assert_eq!(PopupContent::from_spot(&Spot::default()).title, UNKNOWN_NAME);
    }
}
