use crate::{
    data::{feature::Feature, loader::FeatureRequest},
    layers::base::{LayerId, LayerProperties, LayerTrait, LayerType},
};
use serde::{Deserialize, Serialize};

/// RGBA color with a floating alpha, as CSS writes it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// Circle drawn for point features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub radius: f32,
    pub fill: Rgba,
    pub stroke: Stroke,
}

/// Feature label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub text: String,
    pub font: String,
    pub fill: Rgba,
    /// Halo drawn around the glyphs
    pub stroke: Stroke,
    pub offset_y: f32,
}

/// Complete style of one rendered feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    pub image: CircleStyle,
    pub stroke: Stroke,
    pub fill: Rgba,
    pub text: TextStyle,
}

/// Builds the style of a feature labelled `label`.
///
/// Each call returns a fresh value; nothing is shared between features.
pub fn feature_style(label: Option<&str>) -> FeatureStyle {
    FeatureStyle {
        image: CircleStyle {
            radius: 7.0,
            fill: Rgba::new(0, 0, 2, 0.0),
            stroke: Stroke {
                color: Rgba::rgb(255, 255, 255),
                width: 2.0,
            },
        },
        stroke: Stroke {
            color: Rgba::new(13, 89, 253, 0.94),
            width: 2.0,
        },
        fill: Rgba::new(245, 246, 255, 0.46),
        text: TextStyle {
            text: label.unwrap_or_default().to_string(),
            font: "14px sans-serif".to_string(),
            fill: Rgba::rgb(0, 0, 0),
            stroke: Stroke {
                color: Rgba::rgb(255, 255, 255),
                width: 3.0,
            },
            offset_y: -20.0,
        },
    }
}

/// The overlay of cadastral features loaded from the feature file.
///
/// The overlay only describes where its data comes from and how it is styled;
/// the features themselves live in the render engine once the load settles.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorOverlay {
    properties: LayerProperties,
    source: FeatureRequest,
    label_attribute: String,
    /// Number of features delivered, `None` while the load is outstanding
    loaded: Option<usize>,
}

impl VectorOverlay {
    pub fn new(
        id: LayerId,
        name: Option<String>,
        source: FeatureRequest,
        label_attribute: impl Into<String>,
    ) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Vector),
            source,
            label_attribute: label_attribute.into(),
            loaded: None,
        }
    }

    pub fn source(&self) -> &FeatureRequest {
        &self.source
    }

    pub fn label_attribute(&self) -> &str {
        &self.label_attribute
    }

    /// Style for one feature, labelled with its identifying attribute
    pub fn style_for(&self, feature: &Feature) -> FeatureStyle {
        feature_style(feature.label(&self.label_attribute).as_deref())
    }

    pub fn mark_loaded(&mut self, count: usize) {
        self.loaded = Some(count);
    }

    pub fn loaded_count(&self) -> Option<usize> {
        self.loaded
    }
}

impl LayerTrait for VectorOverlay {
    crate::impl_layer_trait!(properties);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Crs;

    fn overlay(name: Option<&str>) -> VectorOverlay {
        VectorOverlay::new(
            LayerId(9),
            name.map(str::to_string),
            FeatureRequest {
                url: "parcels.geojson".to_string(),
                data_crs: Crs::Epsg4686,
                display_crs: Crs::Epsg3857,
            },
            "id",
        )
    }

    #[test]
    fn test_style_labels_each_feature_independently() {
        let layer = overlay(Some("Datos de Nemocón"));
        let a = Feature::new(None).with_property("id", "A-1");
        let b = Feature::new(None).with_property("id", "B-2");

        let style_a = layer.style_for(&a);
        let style_b = layer.style_for(&b);
        assert_eq!(style_a.text.text, "A-1");
        assert_eq!(style_b.text.text, "B-2");
        assert_eq!(style_a.image, style_b.image);

        let unlabeled = layer.style_for(&Feature::new(None));
        assert_eq!(unlabeled.text.text, "");
    }

    #[test]
    fn test_style_constants() {
        let style = feature_style(Some("1"));
        assert_eq!(style.image.radius, 7.0);
        assert_eq!(style.stroke.color.to_css(), "rgba(13, 89, 253, 0.94)");
        assert_eq!(style.fill.to_css(), "rgba(245, 246, 255, 0.46)");
        assert_eq!(style.text.font, "14px sans-serif");
        assert_eq!(style.text.offset_y, -20.0);
    }

    #[test]
    fn test_display_name_placeholder() {
        assert_eq!(overlay(Some("Datos de Nemocón")).display_name(), "Datos de Nemocón");
        assert_eq!(overlay(None).display_name(), "Capa sin nombre");
        assert_eq!(overlay(Some("  ")).display_name(), "Capa sin nombre");
    }

    #[test]
    fn test_loaded_count() {
        let mut layer = overlay(None);
        assert_eq!(layer.loaded_count(), None);
        layer.mark_loaded(12);
        assert_eq!(layer.loaded_count(), Some(12));
    }
}
