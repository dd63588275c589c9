//! Shell command registry and help text.

/// A shell command definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub usage: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(usage: &'static str, description: &'static str) -> Self {
        Self { usage, description }
    }
}

/// Registry of all shell commands.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered commands.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("click X Y", "Select the shape at pixel (X, Y)"),
            Shortcut::new("left | right | up | down", "Move the selected shape one cell"),
            Shortcut::new("r", "Rotate the selected shape"),
            Shortcut::new("key NAME", "Send a raw key name (Left, Right, Up, Down, r)"),
            Shortcut::new("highlight A", "Toggle markers inside shape A"),
            Shortcut::new("highlight A'", "Toggle markers outside shape A"),
            Shortcut::new("lock", "Stop all further movement"),
            Shortcut::new("show", "Draw the grid"),
            Shortcut::new("json", "Dump the canvas state as JSON"),
            Shortcut::new("help", "Show this list"),
            Shortcut::new("quit", "Exit"),
        ]
    }

    /// Format all commands as a help listing.
    pub fn help_text() -> String {
        let mut text = String::from("Commands:\n");
        for shortcut in Self::all() {
            text.push_str(&format!("  {:26} {}\n", shortcut.usage, shortcut.description));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let help = ShortcutRegistry::help_text();
        for shortcut in ShortcutRegistry::all() {
            assert!(help.contains(shortcut.usage));
        }
    }
}
