use crate::{
    core::geo::{LatLng, TileCoord},
    layers::base::{LayerId, LayerProperties, LayerTrait, LayerType},
    tiles::{
        catalog::{BaseLayerDescriptor, BaseLayerKey},
        source::{TileSource, XyzSource},
    },
};

/// A full-coverage raster layer fed from an XYZ tile server
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// Base layer properties
    properties: LayerProperties,
    /// Catalog entry this layer was built from
    key: BaseLayerKey,
    /// Tile source for building tile URLs
    source: XyzSource,
    /// Attribution text
    attribution: Option<String>,
}

impl TileLayer {
    /// Create a visible tile layer for a catalog entry
    pub fn from_descriptor(id: LayerId, descriptor: &BaseLayerDescriptor) -> Self {
        Self {
            properties: LayerProperties::new(
                id,
                Some(descriptor.title.to_string()),
                LayerType::Tile,
            ),
            key: descriptor.key,
            source: XyzSource::new(descriptor.tile_source_template),
            attribution: descriptor.attribution.map(str::to_string),
        }
    }

    pub fn key(&self) -> BaseLayerKey {
        self.key
    }

    /// URL template with `{z}`/`{x}`/`{y}` placeholders
    pub fn url_template(&self) -> &str {
        self.source.template()
    }

    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// URL of one tile, `None` outside the tile grid of its zoom level
    pub fn tile_url(&self, coord: TileCoord) -> Option<String> {
        coord.is_valid().then(|| self.source.url(coord))
    }

    /// URL of the tile covering `position` at `zoom`
    pub fn tile_url_at(&self, position: &LatLng, zoom: u8) -> Option<String> {
        self.tile_url(TileCoord::from_lat_lng(position, zoom))
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);
}
