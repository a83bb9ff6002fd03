//! Page-wide defaults taken from the published spot map.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// South-west corner of the home view (Shikoku).
pub const HOME_SOUTH_WEST: (f64, f64) = (33.0, 132.8);

/// North-east corner of the home view (Shikoku).
pub const HOME_NORTH_EAST: (f64, f64) = (34.6, 134.0);

/// Padding in pixels used when fitting the home bounds (minimal margin for phones).
pub const HOME_PADDING: f64 = 1.0;

/// Default map container size in CSS pixels.
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 600.0);

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom used when recentring on a geolocation fix.
pub const LOCATE_ZOOM: f64 = 14.0;

/// Minimum zoom used when flying to a search match.
pub const FOCUS_ZOOM: f64 = 15.0;

/// Live suggestions shown while typing.
pub const SUGGESTION_LIMIT: usize = 5;

/// First geolocation request deadline.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 20_000;

/// Deadline of the single retry after a timeout or unavailable position.
pub const GEOLOCATION_RETRY_TIMEOUT_MS: u64 = 30_000;

/// Duration of the eased flight between two views.
pub const FLY_TO_DURATION_MS: u64 = 1_000;

/// Leaflet.markercluster default radius in pixels.
pub const MAX_CLUSTER_RADIUS: f64 = 80.0;

/// Clustering is switched off from this zoom level on.
pub const DISABLE_CLUSTERING_AT_ZOOM: f64 = 17.0;

/// Default location of the spots document, relative to the map page.
pub const DEFAULT_DATA_URL: &str = "./data/spots.json";

/// Site name appended to detail page titles.
pub const SITE_NAME: &str = "四国おすすめスポットマップ";

/// Label for spots without a name on the map.
pub const UNKNOWN_NAME: &str = "名称不明";

/// Label for spots without a name on the detail page.
pub const UNNAMED_SPOT: &str = "名称未設定";

/// Title and popup label of the current-position marker.
pub const CURRENT_POSITION_TITLE: &str = "現在地";
pub const CURRENT_POSITION_POPUP: &str = "📍 現在地";

/// User-facing messages.
pub mod messages {
    pub const LOAD_FAILED: &str = "spots.json の読み込みに失敗しました";
    pub const GEOLOCATION_UNSUPPORTED: &str = "このブラウザは位置情報に対応していません";
    pub const GEOLOCATION_DENIED: &str =
        "位置情報の利用が許可されていません。ブラウザや端末の設定を確認してください。";
    pub const GEOLOCATION_FAILED: &str =
        "現在地を取得できませんでした。時間をおいて再度お試しください。";
    pub const DETAIL_MISSING_ID: &str =
        "スポットIDが指定されていません。トップページから再度お試しください。";
    pub const DETAIL_NOT_FOUND: &str = "該当するスポットが見つかりませんでした。";
    pub const DETAIL_LOAD_FAILED: &str =
        "スポット情報の取得に失敗しました。時間をおいて再度お試しください。";
}
