/// Audio collaborator for terminals: the only sound a terminal can make is the bell.
use crate::core::game::CueSink;
use std::io::{stdout, Stdout, Write};
use tracing::debug;

/// Sound and music cues a game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Short confirmation sound on buttons and menu choices
    Click,
    /// Background music on/off
    Music(bool),
}

pub struct TerminalBell {
    out: Stdout,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl CueSink<Cue> for TerminalBell {
    fn play(&mut self, cue: Cue) -> anyhow::Result<()> {
        match cue {
            Cue::Click => {
                self.out.write_all(b"\x07")?;
                self.out.flush()?;
            }
            // no music stream in a terminal
            Cue::Music(on) => debug!(on, "music cue ignored"),
        }
        Ok(())
    }
}
