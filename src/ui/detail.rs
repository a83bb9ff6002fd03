use crate::core::constants::{messages, SITE_NAME, UNNAMED_SPOT};
use crate::data::{loader::SpotLoader, spot::Spot, spot::SpotStore};
use crate::prelude::Arc;
use crate::ui::panel::PanelContent;
use reqwest::Url;

/// Why a detail page shows its error section instead of the spot
#[derive(Debug, thiserror::Error)]
pub enum DetailError {
    #[error("no spot_id given")]
    MissingId,

    #[error("no spot with id {0}")]
    NotFound(String),

    #[error("spots could not be loaded: {0}")]
    LoadFailed(#[from] crate::MapError),
}

impl DetailError {
    /// Message shown to the visitor
    pub fn user_message(&self) -> &'static str {
        match self {
            DetailError::MissingId => messages::DETAIL_MISSING_ID,
            DetailError::NotFound(_) => messages::DETAIL_NOT_FOUND,
            DetailError::LoadFailed(_) => messages::DETAIL_LOAD_FAILED,
        }
    }
}

/// Reads `spot_id` from a full URL, a `?query` or a bare `key=value` query
pub fn spot_id_from_query(input: &str) -> Option<String> {
    let url = Url::parse(input).or_else(|_| {
        let query = input.trim_start_matches('?');
        Url::parse(&format!("http://localhost/?{query}"))
    });

    url.ok()?
        .query_pairs()
        .find(|(key, _)| key == "spot_id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Everything a spot's detail page displays
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub spot: Arc<Spot>,
    pub document_title: String,
    pub meta_description: String,
    pub panel: PanelContent,
}

impl DetailPage {
    pub fn new(spot: Arc<Spot>) -> Self {
        let name = spot.name().unwrap_or(UNNAMED_SPOT).to_string();
        let meta_description = spot
            .description()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name}の詳細ページです。"));

        let mut panel = PanelContent::from_spot(&spot);
        panel.title = name.clone();

        Self {
            document_title: format!("{name}｜{SITE_NAME}"),
            meta_description,
            panel,
            spot,
        }
    }

    /// Looks the spot up in an already loaded store
    pub fn resolve(store: &SpotStore, spot_id: Option<&str>) -> Result<Self, DetailError> {
        let spot_id = spot_id.filter(|id| !id.is_empty()).ok_or(DetailError::MissingId)?;
        let spot = store
            .find_by_id(spot_id)
            .ok_or_else(|| DetailError::NotFound(spot_id.to_string()))?;
        Ok(Self::new(Arc::clone(spot)))
    }

    /// Checks the id, then fetches the spots and resolves the page.
    /// Nothing is fetched when the id is missing.
    pub async fn load(loader: &SpotLoader, spot_id: Option<&str>) -> Result<Self, DetailError> {
        if spot_id.map_or(true, str::is_empty) {
            return Err(DetailError::MissingId);
        }

        let store = loader.load().await.map_err(|err| {
            log::error!("detail page: {}", err);
            DetailError::LoadFailed(err)
        })?;
        Self::resolve(&store, spot_id)
    }
}
