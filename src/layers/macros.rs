//! Boilerplate shared by the layer types

/// Implements the [`LayerTrait`](crate::layers::base::LayerTrait) accessors
/// by delegating to a `LayerProperties` field.
///
/// ```ignore
/// impl LayerTrait for TileLayer {
///     crate::impl_layer_trait!(properties);
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($props:ident) => {
        fn id(&self) -> $crate::layers::base::LayerId {
            self.$props.id
        }

        fn name(&self) -> Option<&str> {
            self.$props.name.as_deref()
        }

        fn layer_type(&self) -> $crate::layers::base::LayerType {
            self.$props.layer_type
        }

        fn is_visible(&self) -> bool {
            self.$props.visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.$props.visible = visible;
        }
    };
}
