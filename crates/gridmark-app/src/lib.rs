//! Gridmark Application
//!
//! Terminal shell around the core: start-up prompts, a command loop and a
//! character rendering of the canvas.

mod app;
mod prompt;
mod shortcuts;
mod ui;

pub use app::{App, CONFIG_ENV, load_config};
pub use prompt::{ask_until, setup_canvas};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{UiAction, UiError, parse_action, render_text};
