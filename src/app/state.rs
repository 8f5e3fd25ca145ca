//! Application State: zentrale Datenhaltung.

mod app_state;
mod interaction;
mod view;

pub use app_state::AppState;
pub use interaction::{InteractionMode, InteractionState};
pub use view::ViewState;
