use spotmap::prelude::*;
use spotmap::constants::messages;

/// Page-level scenarios driven the way a browser page drives them:
/// load, type, confirm, clear
#[cfg(test)]
mod integration_tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Alert(String),
        Suggestions(Vec<String>),
        Panel(String),
        PanelCleared,
        View { zoom: f64, animated: bool },
        Markers(usize),
        Popup(String),
    }

    /// Surface that records every call it receives
    #[derive(Default)]
    struct RecordingSurface {
        events: Vec<Event>,
    }

    impl RecordingSurface {
        fn alerts(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Alert(message) => Some(message.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn view_changes(&self) -> usize {
            self.events.iter().filter(|e| matches!(e, Event::View { .. })).count()
        }
    }

    impl PageSurface for RecordingSurface {
        fn alert(&mut self, message: &str) {
            self.events.push(Event::Alert(message.to_string()));
        }

        fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
            self.events.push(Event::Suggestions(
                suggestions.iter().map(|s| s.display_name.clone()).collect(),
            ));
        }

        fn render_panel(&mut self, panel: &PanelContent) {
            self.events.push(Event::Panel(panel.title.clone()));
        }

        fn clear_panel(&mut self) {
            self.events.push(Event::PanelCleared);
        }

        fn view_changed(&mut self, transition: &ViewTransition) {
            self.events.push(Event::View {
                zoom: transition.to_zoom,
                animated: transition.is_animated(),
            });
        }

        fn markers_changed(&mut self, visible: usize) {
            self.events.push(Event::Markers(visible));
        }

        fn open_popup(&mut self, marker: &Marker) {
            self.events.push(Event::Popup(marker.title().unwrap_or_default().to_string()));
        }
    }

    const CAFE_SPOTS: &str = r#"[
        {"spot_id":"a","name":"Cafe","lat":33.5,"lng":133.5},
        {"spot_id":"b","name":"Cafe Bay","lat":33.6,"lng":133.6},
        {"spot_id":"c","name":"Park","lat":34.0,"lng":133.0}
    ]"#;

    fn cafe_page() -> MapPage<RecordingSurface> {
        let mut page = MapPage::new(MapPageConfig::default(), RecordingSurface::default()).unwrap();
        page.install(SpotStore::from_json_str(CAFE_SPOTS).unwrap());
        page
    }

    fn keys(page: &MapPage<RecordingSurface>, handles: &[MarkerHandle]) -> Vec<String> {
        handles
            .iter()
            .map(|h| page.registry().get(*h).unwrap().key.to_string())
            .collect()
    }

    /// Confirming a keyword shows exactly the substring matches and focuses the first
    #[test]
    fn test_cafe_scenario() {
        let mut page = cafe_page();

        let result = page.apply_search("Cafe");
        assert_eq!(keys(&page, &result.visible), ["a", "b"]);
        assert_eq!(keys(&page, &result.first_match.into_iter().collect::<Vec<_>>()), ["a"]);
        assert_eq!(keys(&page, page.registry().visible()), ["a", "b"]);
        assert_eq!(page.viewport().zoom, 15.0);
        assert!((page.viewport().center.lat - 33.5).abs() < 1e-9);
        assert_eq!(page.surface().events.last(), Some(&Event::Panel("Cafe".to_string())));

        let result = page.apply_search("");
        assert_eq!(keys(&page, &result.visible), ["a", "b", "c"]);

        let before = page.viewport().clone();
        let views = page.surface().view_changes();
        let result = page.apply_search("zzz");
        assert!(result.visible.is_empty());
        assert_eq!(result.first_match, None);
        assert_eq!(page.registry().visible_count(), 0);
        assert_eq!(page.viewport(), &before);
        assert_eq!(page.surface().view_changes(), views, "no view change without a match");
        assert_eq!(page.surface().events.last(), Some(&Event::Markers(0)));
    }

    /// Typing never changes marker visibility and is capped at five names
    #[test]
    fn test_suggestions_while_typing() {
        let spots: Vec<String> = (0..7)
            .map(|i| format!(r#"{{"name":"道の駅 {i}","lat":33.{i}1,"lng":133.5}}"#))
            .collect();
        let mut page = MapPage::new(MapPageConfig::default(), RecordingSurface::default()).unwrap();
        page.install(SpotStore::from_json_str(&format!("[{}]", spots.join(","))).unwrap());

        let suggestions = page.search_input("道の駅");
        assert_eq!(suggestions.len(), 5);
        assert_eq!(page.registry().visible_count(), 7);

        assert!(page.search_input("").is_empty());
        assert_eq!(page.surface().events.last(), Some(&Event::Suggestions(Vec::new())));
    }

    /// Clearing restores every marker and the home view
    #[test]
    fn test_clear_restores_home() {
        let mut page = cafe_page();
        let home = page.viewport().clone();

        page.apply_search("Park");
        assert_eq!(page.registry().visible_count(), 1);
        assert_ne!(page.viewport(), &home);

        page.clear_search();
        assert_eq!(page.registry().visible_count(), 3);
        assert_eq!(page.viewport(), &home);
        assert_eq!(page.selection(), None);
        assert!(page.surface().events.contains(&Event::PanelCleared));
        assert!(page
            .surface()
            .events
            .contains(&Event::View { zoom: home.zoom, animated: false }));
    }

    /// Records without coordinates are counted but never mapped
    #[test]
    fn test_raw_and_mapped_counts() {
        let mut page = MapPage::new(MapPageConfig::default(), RecordingSurface::default()).unwrap();
        page.install(
            SpotStore::from_json_str(
                r#"[
                    {"spot_id":"a","name":"Cafe","lat":33.5,"lng":133.5},
                    {"spot_id":"b","name":"No coords"},
                    {"spot_id":"c","name":"Zero","lat":0,"lng":133.0},
                    {"spot_id":"d","name":"Strings","lat":"33.7","lng":"133.7"}
                ]"#,
            )
            .unwrap(),
        );

        assert_eq!(page.spot_count(), 4);
        assert_eq!(page.mapped_count(), 2);
        assert_eq!(page.surface().events, vec![Event::Markers(2)]);
    }

    /// A failed fetch alerts once and leaves the map empty
    #[tokio::test]
    async fn test_load_failure_alerts() {
        let mut page = MapPage::new(MapPageConfig::default(), RecordingSurface::default()).unwrap();
        let loader = SpotLoader::File("/no/such/dir/spots.json".into());

        assert!(page.load(&loader).await.is_err());
        assert_eq!(page.surface().alerts(), [messages::LOAD_FAILED]);
        assert_eq!(page.mapped_count(), 0);
    }

    /// Loading from disk builds one marker per mappable spot
    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("spotmap-page-{}.json", std::process::id()));
        tokio::fs::write(&path, CAFE_SPOTS).await.unwrap();

        let mut page = MapPage::new(MapPageConfig::default(), RecordingSurface::default()).unwrap();
        page.load(&SpotLoader::File(path.clone())).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(page.mapped_count(), 3);
        assert!(page.surface().alerts().is_empty());

        let surface = page.teardown();
        assert_eq!(surface.events, vec![Event::Markers(3)]);
    }

    /// Markers can be selected directly, e.g. from a suggestion row
    #[test]
    fn test_focus_from_suggestion() {
        let mut page = cafe_page();
        let suggestion = page.search_input("Bay").remove(0);

        let transition = page.focus(suggestion.handle).unwrap();
        assert!(transition.is_animated());
        assert_eq!(page.selection(), Some(suggestion.handle));
        assert!(page.surface().events.contains(&Event::Popup("Cafe Bay".to_string())));
        assert!(page.surface().events.contains(&Event::Panel("Cafe Bay".to_string())));
        // suggestions do not filter
        assert_eq!(page.registry().visible_count(), 3);
    }

    /// Visible markers cluster at the home view and split apart when zoomed in
    #[test]
    fn test_clusters_follow_zoom() {
        let page = cafe_page();
        let layer = page.registry().layer();

        let home_clusters = layer.clusters(page.viewport());
        let total: usize = home_clusters.iter().map(|c| c.count()).sum();
        assert_eq!(total, 3);

        let mut close = page.viewport().clone();
        close.set_view(LatLng::new(33.55, 133.55), 17.0);
        assert!(layer.clusters(&close).iter().all(|c| c.is_single()));
    }
}
