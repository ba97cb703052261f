use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// XYZ source driven by a URL template.
///
/// `{z}`, `{x}` and `{y}` are substituted in whatever order the template lists
/// them, so both `{z}/{y}/{x}` (ArcGIS) and `{z}/{x}/{y}` (OSM) layouts work.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzSource {
    template: String,
}

impl XyzSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl TileSource for XyzSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}
