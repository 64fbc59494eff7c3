pub mod ui;
pub mod input;

pub use ui::{drop_zone_rect, render_ui};
pub use input::InputHandler;
