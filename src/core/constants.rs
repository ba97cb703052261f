//! Map-wide defaults for the cadastral viewer.
//! Keeping them in a single place makes it easier to retarget the deployment.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Longitude of the initial view center (Nemocón, Cundinamarca).
pub const DEFAULT_CENTER_LNG: f64 = -73.87622;

/// Latitude of the initial view center.
pub const DEFAULT_CENTER_LAT: f64 = 5.06332;

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 15.0;

/// Feature file served next to the page.
pub const DEFAULT_FEATURE_URL: &str = "datos_manta_general_nuevo.geojson";

/// Coordinate reference system the feature file is published in.
pub const DEFAULT_DATA_CRS: &str = "EPSG:4686";

/// Coordinate reference system the map is displayed in.
pub const DISPLAY_CRS: &str = "EPSG:3857";

/// Display name of the vector overlay.
pub const DEFAULT_OVERLAY_NAME: &str = "Datos de Nemocón";

/// Feature attribute used as the on-map label.
pub const DEFAULT_LABEL_ATTRIBUTE: &str = "id";

/// Property that never reaches the popup.
pub const GEOMETRY_PROPERTY: &str = "geometry";

/// Legend name for layers that were never given one.
pub const PLACEHOLDER_LAYER_NAME: &str = "Capa sin nombre";

/// Popup auto-pan animation length.
pub const POPUP_AUTO_PAN_MS: u64 = 250;

/// Furthest a click may land outside a feature's geometry and still hit it,
/// in pixels. Within it the drawn circle or stroke decides.
pub const DEFAULT_HIT_TOLERANCE_PX: f64 = 7.0;

/// Fixed screen anchor of the legend panel (top-left offset in pixels).
pub const LEGEND_ANCHOR: (f64, f64) = (10.0, 10.0);

/// Extent fitted by the zoom-to-extent control, in EPSG:3857 metres
/// (min x, min y, max x, max y).
pub const ZOOM_TO_EXTENT: [f64; 4] = [-8_230_000.0, 479_000.0, -8_228_000.0, 481_000.0];
