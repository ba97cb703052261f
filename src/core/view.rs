use crate::core::{
    constants::TILE_SIZE,
    geo::{Crs, Extent, LatLng, Point},
};
use serde::{Deserialize, Serialize};

/// Circumference of the Web Mercator sphere in metres.
const MERCATOR_WORLD: f64 = 2.0 * std::f64::consts::PI * 6378137.0;

/// The camera a map is mounted with: projection, center and zoom, plus the
/// pixel size of the drawing surface so screen positions can be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub projection: Crs,
    /// Center in `projection` units
    pub center: Point,
    pub zoom: f64,
    /// Drawing surface size in pixels
    pub size: Point,
}

impl View {
    /// Creates a Web Mercator view centred on a geographic position
    pub fn from_lat_lng(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            projection: Crs::Epsg3857,
            center: center.to_mercator(),
            zoom,
            size,
        }
    }

    /// Map units per pixel at the current zoom
    pub fn resolution(&self) -> f64 {
        MERCATOR_WORLD / (TILE_SIZE as f64 * 2_f64.powf(self.zoom))
    }

    /// Resolves a pixel on the drawing surface to a map coordinate
    pub fn pixel_to_coordinate(&self, pixel: &Point) -> Point {
        let res = self.resolution();
        Point::new(
            self.center.x + (pixel.x - self.size.x / 2.0) * res,
            self.center.y - (pixel.y - self.size.y / 2.0) * res,
        )
    }

    /// Inverse of [`View::pixel_to_coordinate`]
    pub fn coordinate_to_pixel(&self, coordinate: &Point) -> Point {
        let res = self.resolution();
        Point::new(
            (coordinate.x - self.center.x) / res + self.size.x / 2.0,
            (self.center.y - coordinate.y) / res + self.size.y / 2.0,
        )
    }

    /// Extent currently covered by the drawing surface
    pub fn extent(&self) -> Extent {
        let top_left = self.pixel_to_coordinate(&Point::new(0.0, 0.0));
        let bottom_right = self.pixel_to_coordinate(&self.size);
        Extent::new(
            Point::new(top_left.x, bottom_right.y),
            Point::new(bottom_right.x, top_left.y),
        )
    }

    /// Centers on `extent` and picks the largest zoom that still shows all of it
    pub fn fit(&mut self, extent: &Extent) {
        self.center = extent.center();
        let width = extent.width().max(f64::EPSILON);
        let height = extent.height().max(f64::EPSILON);
        let res = (width / self.size.x.max(1.0)).max(height / self.size.y.max(1.0));
        self.zoom = (MERCATOR_WORLD / (TILE_SIZE as f64 * res)).log2();
    }
}
