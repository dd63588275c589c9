//! Interactive command loop.

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{UiAction, parse_action, render_text};
use gridmark_core::{Canvas, Command, EditorConfig};
use std::io::{self, BufRead, Write};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "GRIDMARK_CONFIG";

/// Message shown when the shapes are locked.
const LOCKED_MESSAGE: &str = "You can no longer move the rectangles.";

/// Load the config named by [`CONFIG_ENV`], falling back to defaults.
pub fn load_config() -> EditorConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return EditorConfig::default();
    };
    EditorConfig::load(&path).unwrap_or_else(|e| {
        log::warn!("{e}; using default config");
        EditorConfig::default()
    })
}

/// The running shell around one canvas.
pub struct App {
    canvas: Canvas,
}

impl App {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        write!(output, "{}", render_text(&self.canvas))?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            if !self.handle_line(&line, output)? {
                return Ok(());
            }
        }
    }

    /// Handle one line of input. Returns false when the user quits.
    pub fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<bool> {
        match parse_action(line) {
            Ok(UiAction::Canvas(Command::Lock)) => {
                self.canvas.lock();
                writeln!(output, "{LOCKED_MESSAGE}")?;
            }
            Ok(UiAction::Canvas(command)) => {
                self.canvas.dispatch(command);
                write!(output, "{}", render_text(&self.canvas))?;
            }
            Ok(UiAction::Show) => write!(output, "{}", render_text(&self.canvas))?,
            Ok(UiAction::Json) => match self.canvas.snapshot().to_json() {
                Ok(json) => writeln!(output, "{json}")?,
                Err(e) => log::error!("Failed to serialize canvas: {e}"),
            },
            Ok(UiAction::Help) => write!(output, "{}", ShortcutRegistry::help_text())?,
            Ok(UiAction::Quit) => return Ok(false),
            Ok(UiAction::Nothing) => {}
            Err(e) => writeln!(output, "{e}")?,
        }
        Ok(true)
    }
}
