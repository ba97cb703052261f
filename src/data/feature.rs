use crate::core::{
    constants::GEOMETRY_PROPERTY,
    geo::{Extent, Point},
};
use geo::BoundingRect;
use serde_json::{Map, Value};

/// One geographic entity of the vector overlay, already in display coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<Value>,
    pub geometry: Option<geo_types::Geometry<f64>>,
    /// Attributes in the order the source file lists them
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Option<geo_types::Geometry<f64>>) -> Self {
        Self {
            id: None,
            geometry,
            properties: Map::new(),
        }
    }

    pub fn with_property<V: Into<Value>>(mut self, key: impl Into<String>, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Text of the labelling attribute, if the feature carries it
    pub fn label(&self, attribute: &str) -> Option<String> {
        self.properties
            .get(attribute)
            .filter(|v| !v.is_null())
            .map(format_value)
    }

    /// Read-only copy of the attributes, as handed to the click handler
    pub fn snapshot(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            properties: self.properties.clone(),
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        let rect = self.geometry.as_ref()?.bounding_rect()?;
        Some(Extent::new(
            Point::new(rect.min().x, rect.min().y),
            Point::new(rect.max().x, rect.max().y),
        ))
    }
}

/// The attribute map of a feature at the moment it was hit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSnapshot {
    pub properties: Map<String, Value>,
}

impl FeatureSnapshot {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    /// Attributes fit for display: everything except the geometry, in
    /// iteration order, with values rendered as text
    pub fn display_properties(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .filter(|(key, _)| key.as_str() != GEOMETRY_PROPERTY)
            .map(|(key, value)| (key.clone(), format_value(value)))
            .collect()
    }
}

/// Renders an attribute value the way it is shown to users: strings without
/// quotes, everything else as compact JSON
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
