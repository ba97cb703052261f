//! Render engine without a drawing surface
//!
//! Keeps the state a real engine would draw from (layer stack, visibility,
//! overlay placement, loaded features) and answers hit tests geometrically.
//! Useful for tests and for driving the map core from a server or a CLI.

use crate::{
    core::{
        constants::DEFAULT_HIT_TOLERANCE_PX,
        geo::{Extent, Point},
        view::View,
    },
    data::feature::{Feature, FeatureSnapshot},
    layers::{
        base::{LayerId, LayerTrait},
        tile::TileLayer,
        vector::FeatureStyle,
    },
    prelude::HashMap,
    rendering::engine::{AutoPan, MountedLayer, OverlayKind, OverlayPosition, RenderEngine, StyleFn},
    spatial::index::{SpatialIndex, SpatialItem},
    ui::controls::MapControl,
    MapError, Result,
};
use geo::{Contains, EuclideanDistance};
use geo_types::{Geometry, Polygon};

#[derive(Debug, Clone, PartialEq)]
enum StackEntry {
    Group { id: LayerId, layers: Vec<TileLayer> },
    Vector { id: LayerId },
}

impl StackEntry {
    fn id(&self) -> LayerId {
        match self {
            StackEntry::Group { id, .. } | StackEntry::Vector { id } => *id,
        }
    }
}

/// Features of one vector layer with their styles and a lookup index
struct LoadedSource {
    features: Vec<Feature>,
    styles: Vec<FeatureStyle>,
    index: SpatialIndex<usize>,
}

pub struct HeadlessEngine {
    available: bool,
    view: Option<View>,
    stack: Vec<StackEntry>,
    visibility: HashMap<LayerId, bool>,
    sources: HashMap<LayerId, LoadedSource>,
    overlays: HashMap<OverlayKind, (OverlayPosition, Option<AutoPan>)>,
    controls: Vec<MapControl>,
    attributions: Vec<String>,
    hit_tolerance_px: f64,
    repaints: usize,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            available: true,
            view: None,
            stack: Vec::new(),
            visibility: HashMap::default(),
            sources: HashMap::default(),
            overlays: HashMap::default(),
            controls: Vec::new(),
            attributions: Vec::new(),
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            repaints: 0,
        }
    }

    /// An engine that reports no drawing surface, as in a non-graphical context
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Ids of the top-level layers, in mount order
    pub fn mounted_layers(&self) -> Vec<LayerId> {
        self.stack.iter().map(StackEntry::id).collect()
    }

    /// Content of a mounted group
    pub fn group_layers(&self, group: LayerId) -> Option<&[TileLayer]> {
        self.stack.iter().find_map(|entry| match entry {
            StackEntry::Group { id, layers } if *id == group => Some(layers.as_slice()),
            _ => None,
        })
    }

    pub fn is_layer_visible(&self, layer: LayerId) -> Option<bool> {
        self.visibility.get(&layer).copied()
    }

    pub fn overlay(&self, overlay: OverlayKind) -> Option<&(OverlayPosition, Option<AutoPan>)> {
        self.overlays.get(&overlay)
    }

    pub fn feature_count(&self, layer: LayerId) -> usize {
        self.sources.get(&layer).map_or(0, |s| s.features.len())
    }

    pub fn feature_styles(&self, layer: LayerId) -> &[FeatureStyle] {
        self.sources
            .get(&layer)
            .map(|s| s.styles.as_slice())
            .unwrap_or_default()
    }

    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    pub fn attributions(&self) -> &[String] {
        &self.attributions
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance_px
    }

    pub fn repaint_count(&self) -> usize {
        self.repaints
    }

    fn is_visible(&self, layer: LayerId) -> bool {
        self.visibility.get(&layer).copied().unwrap_or(true)
    }

    /// Topmost feature of one layer drawn under `coordinate`; later features draw on top
    fn hit_in_source(
        source: &LoadedSource,
        coordinate: &Point,
        resolution: f64,
        max_reach_px: f64,
    ) -> Option<usize> {
        let point: geo_types::Point<f64> = (*coordinate).into();
        source
            .index
            .query_point(coordinate, max_reach_px * resolution)
            .into_iter()
            .map(|item| item.data)
            .filter(|&i| {
                let Some(style) = source.styles.get(i) else {
                    return false;
                };
                let reach = Reach::of(style, max_reach_px, resolution);
                source.features[i]
                    .geometry
                    .as_ref()
                    .is_some_and(|g| geometry_hits(g, &point, &reach))
            })
            .max()
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// How far from its geometry a feature is drawn, in map units
struct Reach {
    /// Radius of the circle drawn for points
    point: f64,
    /// Half the stroke width of lines and polygon outlines
    stroke: f64,
}

impl Reach {
    fn of(style: &FeatureStyle, max_px: f64, resolution: f64) -> Self {
        let px = |drawn: f32| f64::from(drawn).min(max_px) * resolution;
        Self {
            point: px(style.image.radius),
            stroke: px(style.stroke.width / 2.0),
        }
    }
}

fn polygon_hits(polygon: &Polygon<f64>, point: &geo_types::Point<f64>, reach: &Reach) -> bool {
    polygon.contains(point)
        || std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .any(|ring| point.euclidean_distance(ring) <= reach.stroke)
}

fn geometry_hits(geometry: &Geometry<f64>, point: &geo_types::Point<f64>, reach: &Reach) -> bool {
    match geometry {
        Geometry::Point(p) => point.euclidean_distance(p) <= reach.point,
        Geometry::Line(l) => point.euclidean_distance(l) <= reach.stroke,
        Geometry::LineString(l) => point.euclidean_distance(l) <= reach.stroke,
        Geometry::Polygon(p) => polygon_hits(p, point, reach),
        Geometry::MultiPoint(mp) => mp.iter().any(|p| point.euclidean_distance(p) <= reach.point),
        Geometry::MultiLineString(ml) => {
            ml.iter().any(|l| point.euclidean_distance(l) <= reach.stroke)
        }
        Geometry::MultiPolygon(mp) => mp.iter().any(|p| polygon_hits(p, point, reach)),
        Geometry::GeometryCollection(gc) => gc.iter().any(|g| geometry_hits(g, point, reach)),
        Geometry::Rect(r) => polygon_hits(&r.to_polygon(), point, reach),
        Geometry::Triangle(t) => polygon_hits(&t.to_polygon(), point, reach),
    }
}

impl RenderEngine for HeadlessEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn mount(&mut self, view: &View, layers: &[MountedLayer<'_>]) -> Result<()> {
        if !self.available {
            return Err(MapError::Layer("no drawing surface to mount on".to_string()));
        }
        self.view = Some(view.clone());
        self.stack.clear();
        self.visibility.clear();
        for layer in layers {
            match layer {
                MountedLayer::Group { id, layers } => {
                    self.visibility.insert(*id, true);
                    for tile in layers.iter() {
                        self.visibility.insert(tile.id(), tile.is_visible());
                    }
                    self.stack.push(StackEntry::Group {
                        id: *id,
                        layers: layers.to_vec(),
                    });
                }
                MountedLayer::Vector(overlay) => {
                    self.visibility.insert(overlay.id(), overlay.is_visible());
                    self.stack.push(StackEntry::Vector { id: overlay.id() });
                }
            }
        }
        log::debug!("headless engine mounted {} layers", self.stack.len());
        Ok(())
    }

    fn replace_group(&mut self, group: LayerId, layers: &[TileLayer]) {
        let replaced = self.stack.iter_mut().find_map(|entry| match entry {
            StackEntry::Group { id, layers } if *id == group => Some(layers),
            _ => None,
        });
        if let Some(content) = replaced {
            for old in content.iter() {
                self.visibility.remove(&old.id());
            }
            *content = layers.to_vec();
            for tile in layers {
                self.visibility.insert(tile.id(), tile.is_visible());
            }
        }
    }

    fn set_layer_visible(&mut self, layer: LayerId, visible: bool) {
        if let Some(flag) = self.visibility.get_mut(&layer) {
            *flag = visible;
        }
    }

    fn load_features(&mut self, layer: LayerId, features: Vec<Feature>, style: StyleFn<'_>) {
        let styles = features.iter().map(style).collect();
        let items = features
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.extent().map(|extent| SpatialItem::new(extent, i)))
            .collect();
        self.sources.insert(
            layer,
            LoadedSource {
                features,
                styles,
                index: SpatialIndex::bulk_load(items),
            },
        );
    }

    fn coordinate_at_pixel(&self, pixel: &Point) -> Option<Point> {
        self.view.as_ref().map(|view| view.pixel_to_coordinate(pixel))
    }

    fn feature_at_pixel(&self, pixel: &Point) -> Option<FeatureSnapshot> {
        let view = self.view.as_ref()?;
        let coordinate = view.pixel_to_coordinate(pixel);
        let resolution = view.resolution();

        // Topmost layer first
        self.stack.iter().rev().find_map(|entry| match entry {
            StackEntry::Vector { id } if self.is_visible(*id) => {
                let source = self.sources.get(id)?;
                Self::hit_in_source(source, &coordinate, resolution, self.hit_tolerance_px)
                    .map(|i| source.features[i].snapshot())
            }
            _ => None,
        })
    }

    fn set_hit_tolerance(&mut self, pixels: f64) {
        self.hit_tolerance_px = pixels.max(0.0);
    }

    fn set_overlay_position(
        &mut self,
        overlay: OverlayKind,
        position: Option<OverlayPosition>,
        auto_pan: Option<AutoPan>,
    ) {
        match position {
            Some(position) => {
                self.overlays.insert(overlay, (position, auto_pan));
            }
            None => {
                self.overlays.remove(&overlay);
            }
        }
    }

    fn add_control(&mut self, control: &MapControl) {
        self.controls.push(control.clone());
    }

    fn set_attributions(&mut self, attributions: &[String]) {
        self.attributions = attributions.to_vec();
    }

    fn fit_extent(&mut self, extent: &Extent) {
        if let Some(view) = self.view.as_mut() {
            view.fit(extent);
        }
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }
}
