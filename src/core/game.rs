/// Core game interface for the hangterm engine
use crossterm::event::Event;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Handle given to the game on every callback. Cues sent through it are
/// drained by the engine and handed to the audio collaborator.
pub struct Context<C> {
    pub tx: UnboundedSender<C>,
}

impl<C> Context<C> {
    pub fn new(tx: UnboundedSender<C>) -> Self {
        Self { tx }
    }

    /// Queue a cue for playback. A closed channel only means the engine is
    /// shutting down, so the cue is dropped.
    pub fn emit(&self, cue: C) {
        let _ = self.tx.send(cue);
    }
}

/// Main game trait driven by the engine loop
pub trait Game {
    /// Sound/music cues the game can ask the audio collaborator to play
    type Cue: Send + 'static;

    /// How often the loop wakes up when no input arrives
    fn tick_rate(&self) -> Duration {
        Duration::from_millis(16)
    }

    /// Advance time. Called once per iteration, before that iteration's input.
    fn on_tick(&mut self, dt: f32, ctx: &Context<Self::Cue>);

    /// Deliver one terminal event (key, mouse, resize...)
    fn handle_input(&mut self, event: Event, ctx: &Context<Self::Cue>);

    /// Draw the current state. Rendering never mutates game state.
    fn render(&self, frame: &mut ratatui::Frame);

    /// The loop exits once this returns true
    fn should_quit(&self) -> bool;
}

/// Output side of the audio collaborator
pub trait CueSink<C> {
    fn play(&mut self, cue: C) -> anyhow::Result<()>;
}
