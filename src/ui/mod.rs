pub mod controls;
pub mod legend;
pub mod popup;

#[cfg(feature = "egui")]
pub mod panel;

pub use controls::MapControl;
pub use legend::{LegendEntry, LegendPanel, LegendTarget};
pub use popup::{PopupEntry, PopupState, PopupTarget};

#[cfg(feature = "egui")]
pub use panel::{show_controls, show_popup};
