//! Main application entry point.

use gridmark_app::{App, ShortcutRegistry, load_config, setup_canvas};
use std::io::{self, Write};

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Starting Gridmark");

    let config = load_config();
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let Some(canvas) = setup_canvas(&mut input, &mut output, &config)? else {
        return Ok(());
    };
    write!(output, "{}", ShortcutRegistry::help_text())?;
    App::new(canvas).run(&mut input, &mut output)
}
