//! Spot name search.
//!
//! Two modes share one match rule, a case-sensitive substring test against the
//! marker's display name:
//!
//! * **Suggest** runs while typing. An empty keyword matches nothing, at most
//!   `limit` results are returned, and marker visibility is never touched.
//! * **Apply** runs on explicit confirmation. An empty keyword matches every
//!   marker, and the registry is changed to show exactly the matches.
//!
//! The two modes treat the empty keyword differently on purpose: an empty box
//! shows no suggestions, while confirming it shows the whole map again.

use crate::layers::registry::{MarkerHandle, MarkerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Suggest,
    Apply,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    pub visible: Vec<MarkerHandle>,
    pub first_match: Option<MarkerHandle>,
}

impl FilterResult {
    fn from_matches(visible: Vec<MarkerHandle>) -> Self {
        let first_match = visible.first().copied();
        Self {
            visible,
            first_match,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// One row of the live suggestion list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub handle: MarkerHandle,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct SearchEngine {
    suggestion_limit: usize,
}

impl SearchEngine {
    pub fn new(suggestion_limit: usize) -> Self {
        Self { suggestion_limit }
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    pub fn matches(keyword: &str, display_name: &str) -> bool {
        display_name.contains(keyword)
    }

    /// Computes the matches for `keyword` without touching the registry
    pub fn filter(
        &self,
        registry: &MarkerRegistry,
        keyword: &str,
        mode: FilterMode,
    ) -> FilterResult {
        let matching = registry
            .iter()
            .filter(|(_, entry)| Self::matches(keyword, &entry.display_name))
            .map(|(handle, _)| handle);

        let visible = match mode {
            FilterMode::Suggest if keyword.is_empty() => Vec::new(),
            FilterMode::Suggest => matching.take(self.suggestion_limit).collect(),
            FilterMode::Apply => matching.collect(),
        };
        FilterResult::from_matches(visible)
    }

    pub fn suggest(&self, registry: &MarkerRegistry, keyword: &str) -> Vec<Suggestion> {
        self.filter(registry, keyword, FilterMode::Suggest)
            .visible
            .into_iter()
            .filter_map(|handle| {
                registry.get(handle).map(|entry| Suggestion {
                    handle,
                    display_name: entry.display_name.clone(),
                })
            })
            .collect()
    }

    /// Filters and makes the registry show exactly the result
    pub fn apply(&self, registry: &mut MarkerRegistry, keyword: &str) -> FilterResult {
        let result = self.filter(registry, keyword, FilterMode::Apply);
        registry.show_only(&result.visible);
        log::debug!(
            "search {:?}: {} of {} markers visible",
            keyword,
            result.visible.len(),
            registry.len()
        );
        result
    }

    /// Drops the filter and shows every marker
    pub fn clear(&self, registry: &mut MarkerRegistry) {
        registry.show_all();
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(crate::core::constants::SUGGESTION_LIMIT)
    }
}
