//! Feature inspection popup
//!
//! The popup's state changes only through [`PopupState::on_click`] and
//! [`PopupState::hidden`]. Drawing it is left to the engine (placement) and an
//! optional [`PopupTarget`] (content).

use crate::{
    core::geo::Point,
    data::feature::FeatureSnapshot,
    input::events::ClickEvent,
};

/// One displayed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupEntry {
    pub key: String,
    pub value: String,
}

impl PopupEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    pub visible: bool,
    /// Map coordinate the popup points at while visible
    pub anchor: Option<Point>,
    pub content: Vec<PopupEntry>,
}

impl PopupState {
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Next state after a click that hit `hit` (or nothing).
    ///
    /// A miss always hides, whatever was shown before. A hit shows the
    /// feature's attributes, minus its geometry, anchored at the click.
    pub fn on_click(self, click: &ClickEvent, hit: Option<&FeatureSnapshot>) -> Self {
        match hit {
            None => Self::hidden(),
            Some(feature) => Self {
                visible: true,
                anchor: Some(click.coordinate),
                content: feature
                    .display_properties()
                    .into_iter()
                    .map(|(key, value)| PopupEntry { key, value })
                    .collect(),
            },
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Container the popup content is written into
pub trait PopupTarget {
    fn set_content(&mut self, entries: &[PopupEntry]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::Feature;
    use serde_json::json;

    fn click(x: f64, y: f64) -> ClickEvent {
        ClickEvent {
            pixel: Point::new(10.0, 20.0),
            coordinate: Point::new(x, y),
        }
    }

    fn showing() -> PopupState {
        let hit = Feature::new(None).with_property("id", "7").snapshot();
        PopupState::hidden().on_click(&click(1.0, 1.0), Some(&hit))
    }

    #[test]
    fn test_hit_shows_attributes_in_order() {
        let hit = Feature::new(None)
            .with_property("id", "42")
            .with_property("geometry", json!({"type": "Polygon"}))
            .with_property("area", "100")
            .snapshot();

        let state = PopupState::hidden().on_click(&click(-8229000.0, 480000.0), Some(&hit));
        assert!(state.visible);
        assert_eq!(state.anchor, Some(Point::new(-8229000.0, 480000.0)));
        assert_eq!(
            state.content,
            vec![PopupEntry::new("id", "42"), PopupEntry::new("area", "100")]
        );
    }

    #[test]
    fn test_miss_hides_from_any_state() {
        assert_eq!(PopupState::hidden().on_click(&click(0.0, 0.0), None), PopupState::hidden());
        assert_eq!(showing().on_click(&click(0.0, 0.0), None), PopupState::hidden());
    }

    #[test]
    fn test_hit_replaces_previous_feature() {
        let other = Feature::new(None).with_property("id", "8").snapshot();
        let state = showing().on_click(&click(5.0, 5.0), Some(&other));
        assert_eq!(state.content, vec![PopupEntry::new("id", "8")]);
        assert_eq!(state.anchor, Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_feature_without_attributes() {
        let bare = FeatureSnapshot::default();
        let state = PopupState::hidden().on_click(&click(0.0, 0.0), Some(&bare));
        assert!(state.visible);
        assert!(state.content.is_empty());
    }
}
