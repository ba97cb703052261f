use crate::{
    core::geo::Crs,
    data::feature::Feature,
    MapError, Result,
};
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position; altitude and any further ordinates are ignored
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<Value>,
    /// `None` when absent, null or not a geometry we understand
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

fn lenient_geometry<'de, D>(deserializer: D) -> std::result::Result<Option<GeoJsonGeometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            log::debug!("ignoring malformed geometry: {}", e);
            None
        }
    }))
}

/// Legacy `crs` member (GeoJSON 2008): `{"type": "name", "properties": {"name": ...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCrs {
    pub properties: NamedCrsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCrsProperties {
    pub name: String,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection {
        features: Vec<GeoJsonFeature>,
        crs: Option<NamedCrs>,
    },
    Geometry(GeoJsonGeometry),
}

#[derive(Deserialize)]
struct FeatureCollectionDoc {
    features: Vec<GeoJsonFeature>,
    #[serde(default)]
    crs: Option<NamedCrs>,
}

impl GeoJson {
    /// Parses any GeoJSON root object, dispatching on its `type` member
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        let invalid = |e: serde_json::Error| MapError::ParseError(format!("Invalid GeoJSON: {}", e));
        let value: Value = serde_json::from_str(geojson_str).map_err(invalid)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match kind.as_str() {
            "Feature" => serde_json::from_value(value).map(GeoJson::Feature),
            "FeatureCollection" => serde_json::from_value::<FeatureCollectionDoc>(value)
                .map(|doc| GeoJson::FeatureCollection {
                    features: doc.features,
                    crs: doc.crs,
                }),
            _ => serde_json::from_value(value).map(GeoJson::Geometry),
        }
        .map_err(invalid)
    }

    /// Reference system declared inside the document, when it names one we support
    pub fn declared_crs(&self) -> Option<Crs> {
        match self {
            GeoJson::FeatureCollection { crs: Some(crs), .. } => {
                match crs.properties.name.parse() {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        log::debug!("ignoring declared crs: {}", e);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    /// Converts every feature into display coordinates.
    ///
    /// The document's own `crs` member wins over `data_crs`. A feature whose
    /// geometry is malformed (bad positions, unknown type, missing members)
    /// keeps its attributes but loses its geometry, so it can never be hit.
    pub fn into_features(self, data_crs: Crs, display_crs: Crs) -> Vec<Feature> {
        let source_crs = self.declared_crs().unwrap_or(data_crs);
        let raw = match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features, .. } => features,
            GeoJson::Geometry(geometry) => vec![GeoJsonFeature {
                id: None,
                geometry: Some(geometry),
                properties: None,
            }],
        };

        raw.into_iter()
            .map(|f| {
                let geometry = f.geometry.and_then(|g| {
                    g.to_geo(source_crs, display_crs)
                        .map_err(|e| log::debug!("dropping geometry of feature {:?}: {}", f.id, e))
                        .ok()
                });
                Feature {
                    id: f.id,
                    geometry,
                    properties: f.properties.unwrap_or_default(),
                }
            })
            .collect()
    }
}

/// Parses a GeoJSON document and reprojects its features
pub fn parse_features(geojson_str: &str, data_crs: Crs, display_crs: Crs) -> Result<Vec<Feature>> {
    Ok(GeoJson::from_str(geojson_str)?.into_features(data_crs, display_crs))
}

impl GeoJsonGeometry {
    /// Converts to a `geo` geometry, reprojecting each position
    pub fn to_geo(&self, from: Crs, to: Crs) -> Result<Geometry<f64>> {
        let coord = |p: &Position| -> Result<Coord<f64>> {
            match p.as_slice() {
                [x, y, ..] if x.is_finite() && y.is_finite() => {
                    let (x, y) = from.transform(to, *x, *y);
                    Ok(Coord { x, y })
                }
                _ => Err(MapError::ParseError(format!("invalid position {:?}", p))),
            }
        };
        let line = |ps: &[Position]| -> Result<LineString<f64>> {
            ps.iter().map(&coord).collect::<Result<Vec<_>>>().map(LineString::new)
        };
        let polygon = |rings: &[Vec<Position>]| -> Result<Polygon<f64>> {
            let mut rings = rings.iter().map(|r| line(r));
            let exterior = rings
                .next()
                .ok_or_else(|| MapError::ParseError("polygon without rings".to_string()))??;
            let interiors = rings.collect::<Result<Vec<_>>>()?;
            Ok(Polygon::new(exterior, interiors))
        };

        Ok(match self {
            GeoJsonGeometry::Point { coordinates } => Point::from(coord(coordinates)?).into(),
            GeoJsonGeometry::LineString { coordinates } => line(coordinates)?.into(),
            GeoJsonGeometry::Polygon { coordinates } => polygon(coordinates)?.into(),
            GeoJsonGeometry::MultiPoint { coordinates } => MultiPoint::new(
                coordinates
                    .iter()
                    .map(|p| coord(p).map(Point::from))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            GeoJsonGeometry::MultiLineString { coordinates } => MultiLineString::new(
                coordinates
                    .iter()
                    .map(|l| line(l))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            GeoJsonGeometry::MultiPolygon { coordinates } => MultiPolygon::new(
                coordinates
                    .iter()
                    .map(|p| polygon(p))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                Geometry::GeometryCollection(GeometryCollection::new_from(
                    geometries
                        .iter()
                        .map(|g| g.to_geo(from, to))
                        .collect::<Result<Vec<_>>>()?,
                ))
            }
        })
    }
}
