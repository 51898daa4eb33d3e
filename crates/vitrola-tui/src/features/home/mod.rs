//! Home screen: carousel, search, and the purchase modal.

mod render;
mod state;
mod update;

pub use render::render_home;
pub use state::{HomeFocus, HomeMode, HomeState};
pub use update::{captures_text, enter, handle_event, handle_key, submit_purchase, submit_search};
