//! Terminal UI: rendering and event handling

pub mod draw;
pub mod events;

pub use draw::{render_footer, render_header, render_specializations_panel, render_summaries_panel};
pub use events::EventHandler;
