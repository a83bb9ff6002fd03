use crate::core::constants::UNKNOWN_NAME;
use crate::core::geo::LatLng;
use crate::prelude::Arc;
use crate::{MapError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A point of interest as published in `spots.json`.
///
/// Every field is optional in the document and read leniently, so one odd
/// value never drops the whole record: coordinates accept numbers and numeric
/// strings, text fields accept numbers and booleans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    #[serde(default, deserialize_with = "lenient_string")]
    pub spot_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prefecture: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub municipality: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub google_url: Option<String>,
}

impl Spot {
    /// Marker position, `None` when the spot cannot be placed on the map.
    ///
    /// Zero coordinates count as missing, like the falsy check of the published page.
    pub fn position(&self) -> Option<LatLng> {
        let lat = self.lat.filter(|v| v.is_finite() && *v != 0.0)?;
        let lng = self.lng.filter(|v| v.is_finite() && *v != 0.0)?;
        let position = LatLng::new(lat, lng);
        position.is_valid().then_some(position)
    }

    pub fn is_mappable(&self) -> bool {
        self.position().is_some()
    }

    /// Name used for search matching and marker titles
    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or(UNKNOWN_NAME)
    }

    pub fn spot_id(&self) -> Option<&str> {
        non_empty(&self.spot_id)
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn google_url(&self) -> Option<&str> {
        non_empty(&self.google_url)
    }

    /// "prefecture municipality", either part may be missing
    pub fn area(&self) -> Option<String> {
        let area = match (non_empty(&self.prefecture), non_empty(&self.municipality)) {
            (None, None) => return None,
            (Some(pref), None) => pref.to_string(),
            (None, Some(muni)) => muni.to_string(),
            (Some(pref), Some(muni)) => format!("{pref} {muni}"),
        };
        let area = area.trim();
        (!area.is_empty()).then(|| area.to_string())
    }
}

/// Optional text that counts as absent when empty
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Text field: numbers and booleans are stringified, other shapes are absent
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Identity of a spot: its `spot_id` when present, else its position in the document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpotKey {
    Id(String),
    Index(usize),
}

impl SpotKey {
    pub fn for_spot(spot: &Spot, index: usize) -> Self {
        match spot.spot_id() {
            Some(id) => SpotKey::Id(id.to_string()),
            None => SpotKey::Index(index),
        }
    }
}

impl std::fmt::Display for SpotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpotKey::Id(id) => write!(f, "{id}"),
            SpotKey::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// The immutable list of spots loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct SpotStore {
    spots: Vec<Arc<Spot>>,
}

impl SpotStore {
    pub fn new(spots: Vec<Spot>) -> Self {
        Self {
            spots: spots.into_iter().map(Arc::new).collect(),
        }
    }

    /// Builds the store from a parsed document, which must be a JSON array.
    ///
    /// Array elements that are not spot objects are kept as empty spots so the
    /// raw count still matches the document.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(MapError::InvalidData("spots data is invalid".to_string()));
        };

        let spots = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<Spot>(item).unwrap_or_else(|err| {
                    log::warn!("spot #{} is malformed and cannot be mapped: {}", index, err);
                    Spot::default()
                })
            })
            .collect();

        Ok(Self::new(spots))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn spots(&self) -> &[Arc<Spot>] {
        &self.spots
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Spot>> {
        self.spots.get(index)
    }

    /// Number of records in the fetched document
    pub fn raw_count(&self) -> usize {
        self.spots.len()
    }

    /// Number of records that can be placed on the map
    pub fn mappable_count(&self) -> usize {
        self.spots.iter().filter(|s| s.is_mappable()).count()
    }

    pub fn find_by_id(&self, spot_id: &str) -> Option<&Arc<Spot>> {
        self.spots.iter().find(|s| s.spot_id() == Some(spot_id))
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_fields() {
        let store = SpotStore::from_json_str(
            r#"[
                {"spot_id": 42, "name": "Castle", "lat": "33.84", "lng": 132.77},
                {"spot_id": "", "name": "", "lat": 0, "lng": 133.0}
            ]"#,
        )
        .unwrap();

        let castle = store.get(0).unwrap();
        assert_eq!(castle.spot_id(), Some("42"));
        assert_eq!(castle.position(), Some(LatLng::new(33.84, 132.77)));

        let blank = store.get(1).unwrap();
        assert_eq!(blank.spot_id(), None);
        assert_eq!(blank.display_name(), UNKNOWN_NAME);
        assert!(!blank.is_mappable());
    }

    #[test]
    fn test_non_string_text_keeps_record() {
        let store = SpotStore::from_json_str(
            r#"[
                {"spot_id": "a", "name": 123, "lat": 33.5, "lng": 133.5},
                {"spot_id": "b", "name": "Cafe", "category": 7, "url": true,
                 "description": {"ja": "x"}, "lat": 33.6, "lng": 133.6}
            ]"#,
        )
        .unwrap();

        assert_eq!(store.mappable_count(), 2);
        let a = store.find_by_id("a").unwrap();
        assert_eq!(a.display_name(), "123");

        let b = store.find_by_id("b").unwrap();
        assert_eq!(b.category(), Some("7"));
        assert_eq!(b.url(), Some("true"));
        assert_eq!(b.description(), None);

        let registry = crate::layers::registry::MarkerRegistry::build(
            &store,
            crate::spatial::clustering::ClusteringConfig::default(),
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_counts_keep_unmappable_records() {
        let store = SpotStore::from_json_str(
            r#"[{"name": "A", "lat": 33.5, "lng": 133.5}, {"name": "B"}, 7]"#,
        )
        .unwrap();

        assert_eq!(store.raw_count(), 3);
        assert_eq!(store.mappable_count(), 1);
    }

    #[test]
    fn test_rejects_non_array_document() {
        let result = SpotStore::from_json_str(r#"{"spots": []}"#);
        assert!(matches!(result, Err(MapError::InvalidData(_))));

        let result = SpotStore::from_json_str("not json");
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_area_joins_prefecture_and_municipality() {
        let spot = Spot {
            prefecture: Some("高知県".to_string()),
            municipality: Some("高知市".to_string()),
            ..Default::default()
        };
        assert_eq!(spot.area().as_deref(), Some("高知県 高知市"));

        let only_muni = Spot {
            municipality: Some("室戸市".to_string()),
            ..Default::default()
        };
        assert_eq!(only_muni.area().as_deref(), Some("室戸市"));
        assert_eq!(Spot::default().area(), None);
    }

    #[test]
    fn test_spot_key() {
        let with_id = Spot {
            spot_id: Some("a".to_string()),
            ..Default::default()
        };
        assert_eq!(SpotKey::for_spot(&with_id, 3), SpotKey::Id("a".to_string()));
        assert_eq!(SpotKey::for_spot(&Spot::default(), 3), SpotKey::Index(3));
        assert_eq!(SpotKey::Index(3).to_string(), "#3");
    }
}
