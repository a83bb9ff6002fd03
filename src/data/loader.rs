use crate::data::spot::SpotStore;
use crate::{MapError, Result};
use once_cell::sync::Lazy;
use reqwest::Client;
use std::path::PathBuf;

/// Shared HTTP client with a custom User-Agent. Building the client once
/// avoids TLS and connection pool setup for every fetch.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("spotmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build reqwest client")
});

/// Where `spots.json` comes from.
///
/// There is no retry and no cancellation: a failed fetch is reported once and
/// the page stays empty.
#[derive(Debug, Clone, PartialEq)]
pub enum SpotLoader {
    Http(String),
    File(PathBuf),
}

impl SpotLoader {
    /// `http://` and `https://` locations are fetched, anything else is read from disk
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SpotLoader::Http(location.to_string())
        } else {
            SpotLoader::File(PathBuf::from(location))
        }
    }

    pub fn location(&self) -> String {
        match self {
            SpotLoader::Http(url) => url.clone(),
            SpotLoader::File(path) => path.display().to_string(),
        }
    }

    pub async fn load(&self) -> Result<SpotStore> {
        let store = match self {
            SpotLoader::Http(url) => {
                let response = HTTP_CLIENT.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(MapError::HttpStatus {
                        url: url.clone(),
                        status: response.status().as_u16(),
                    });
                }
                let document: serde_json::Value = response.json().await?;
                SpotStore::from_value(document)?
            }
            SpotLoader::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                SpotStore::from_slice(&bytes)?
            }
        };

        log::info!("spots: {} loaded from {}", store.raw_count(), self.location());
        Ok(store)
    }
}
