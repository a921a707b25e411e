//! Commands broadcast to every snowfall layer.

use std::fmt;

/// A command understood by every layer controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Resume animation and begin populating the layer.
    Start,
    /// Freeze the layer in place.
    Stop,
    /// Add a single particle.
    Spawn,
    /// Remove every particle.
    Clear,
}

impl Command {
    /// All commands, in the order they are listed in help text.
    pub const ALL: [Command; 4] = [Command::Start, Command::Stop, Command::Spawn, Command::Clear];

    /// Look up a command by name.
    ///
    /// Unknown names yield `None`; callers are expected to ignore them.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "start" => Some(Command::Start),
            "stop" => Some(Command::Stop),
            "spawn" => Some(Command::Spawn),
            "clear" => Some(Command::Clear),
            _ => None,
        }
    }

    /// The name this command is invoked by.
    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Spawn => "spawn",
            Command::Clear => "clear",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
