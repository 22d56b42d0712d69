use crate::core::game::{Context, CueSink, Game};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Engine<G: Game, S: CueSink<G::Cue>> {
    game: G,
    sink: S,
}

impl<G: Game, S: CueSink<G::Cue>> Engine<G, S> {
    pub fn new(game: G, sink: S) -> Self {
        Self { game, sink }
    }

    /// Runs the control loop until the game quits (or Ctrl-C) and hands the
    /// game back so callers can inspect its final state.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let mut last_tick = Instant::now();

        // cues queued by the game, played outside of its callbacks
        let (outbox_tx, mut outbox_rx) = tokio::sync::mpsc::unbounded_channel::<G::Cue>();
        let ctx = Context::new(outbox_tx);

        info!("engine loop started");
        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (Non-blocking): collect everything that arrived this iteration
            let mut events = Vec::new();
            while event::poll(Duration::from_millis(0))? {
                let ev = event::read()?;
                if let Event::Key(key) = &ev {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        info!("interrupted");
                        return Ok(self.game);
                    }
                }
                events.push(ev);
            }

            let dt = last_tick.elapsed().as_secs_f32();
            last_tick = Instant::now();
            step(&mut self.game, dt, events, &ctx);

            if self.game.should_quit() {
                break;
            }

            tokio::select! {
                Some(cue) = outbox_rx.recv() => {
                    self.sink.play(cue)?;
                }
                _ = tokio::time::sleep(self.game.tick_rate()) => {}
            }

            // anything else queued in the same iteration
            while let Ok(cue) = outbox_rx.try_recv() {
                self.sink.play(cue)?;
            }
        }

        debug!("engine loop finished");
        Ok(self.game)
    }
}

/// One iteration of game logic: the tick first, then the iteration's input,
/// so a guess never lands after the clock ran out.
pub fn step<G: Game>(game: &mut G, dt: f32, events: Vec<Event>, ctx: &Context<G::Cue>) {
    game.on_tick(dt, ctx);
    for ev in events {
        game.handle_input(ev, ctx);
    }
}
