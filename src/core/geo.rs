use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let lat = Self::clamp_lat(self.lat);
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A point in screen pixels or in projected map units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<Point> for geo_types::Point<f64> {
    fn from(point: Point) -> Self {
        geo_types::Point::new(point.x, point.y)
    }
}

/// Axis-aligned rectangle in projected map units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: Point,
    pub max: Point,
}

impl Extent {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Builds an extent from `[min_x, min_y, max_x, max_y]`
    pub fn from_array(coords: [f64; 4]) -> Self {
        Self::new(
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Coordinate reference systems the viewer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Crs {
    /// WGS84 longitude/latitude in degrees
    Epsg4326,
    /// MAGNA-SIRGAS longitude/latitude in degrees
    Epsg4686,
    /// Spherical Web Mercator in metres
    Epsg3857,
}

impl Crs {
    pub fn code(&self) -> &'static str {
        match self {
            Crs::Epsg4326 => "EPSG:4326",
            Crs::Epsg4686 => "EPSG:4686",
            Crs::Epsg3857 => "EPSG:3857",
        }
    }

    /// Whether coordinates are expressed in degrees of longitude/latitude
    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Epsg4326 | Crs::Epsg4686)
    }

    /// Reprojects an `(x, y)` pair from `self` into `target`.
    ///
    /// MAGNA-SIRGAS is realised on ITRF and stays within a metre of WGS84, so the
    /// two geographic systems are treated as coincident.
    pub fn transform(&self, target: Crs, x: f64, y: f64) -> (f64, f64) {
        match (self.is_geographic(), target.is_geographic()) {
            (true, true) | (false, false) => (x, y),
            (true, false) => {
                let p = LatLng::new(y, x).to_mercator();
                (p.x, p.y)
            }
            (false, true) => {
                let ll = LatLng::from_mercator(Point::new(x, y));
                (ll.lng, ll.lat)
            }
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Crs {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        let code = normalized
            .strip_prefix("EPSG:")
            .or_else(|| normalized.strip_prefix("URN:OGC:DEF:CRS:EPSG::"))
            .unwrap_or(&normalized);
        match code {
            "4326" | "URN:OGC:DEF:CRS:OGC:1.3:CRS84" => Ok(Crs::Epsg4326),
            "4686" => Ok(Crs::Epsg4686),
            "3857" | "900913" => Ok(Crs::Epsg3857),
            _ => Err(MapError::UnsupportedCrs(s.to_string())),
        }
    }
}

impl TryFrom<String> for Crs {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.code().to_string()
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Creates a tile coordinate from a LatLng and zoom level
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let n = 2_f64.powi(zoom as i32);

        let x = ((lat_lng.lng + 180.0) / 360.0 * n).floor() as u32;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32;

        Self::new(x, y, zoom)
    }

    /// Checks if the tile is valid for its zoom level
    pub fn is_valid(&self) -> bool {
        // From zoom 32 on every u32 column and row exists
        1_u32
            .checked_shl(u32::from(self.z))
            .map_or(true, |max_coord| self.x < max_coord && self.y < max_coord)
    }
}
