pub mod events;
pub mod handler;

pub use events::{ClickEvent, EventResponse, UiAction};
pub use handler::InteractionController;
