use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use ratatui::{DefaultTerminal, Frame};

/// Largest time delta ever passed to [`App::update`], so a stalled terminal
/// does not turn into a giant simulation jump.
const MAX_DT_MS: f32 = 100.0;

/// Trait for TUI applications driven by [`Tui::run`].
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, event: Event);

    /// Advances the simulation by `dt` milliseconds (called once per tick).
    fn update(&mut self, dt: f32);

    /// Draws the screen (called after each tick).
    fn draw(&self, frame: &mut Frame);
}

/// Fixed-tick TUI runtime.
///
/// Between ticks it drains terminal events into `App::handle_event`; on each
/// tick it calls `App::update` with the measured time delta and then redraws.
#[derive(Debug)]
pub struct Tui {
    tick_interval: Duration,
}

impl Tui {
    /// Creates a runtime ticking `rate` times per second.
    #[must_use]
    pub fn with_tick_rate(rate: f64) -> Self {
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / rate),
        }
    }

    /// Runs the application until `App::should_exit` returns true.
    pub fn run<A>(self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            // Key-release events only arrive through the keyboard
            // enhancement protocol, which not every terminal speaks.
            let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if enhanced {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }
            let result = self.run_loop(terminal, app);
            if enhanced {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn run_loop<A>(&self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        let mut last_tick = Instant::now();
        while !app.should_exit() {
            let next_tick = last_tick + self.tick_interval;
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                app.handle_event(event::read()?);
                continue;
            }

            let now = Instant::now();
            let dt = now.duration_since(last_tick).as_secs_f32() * 1000.0;
            last_tick = now;
            app.update(dt.min(MAX_DT_MS));
            terminal.draw(|frame| app.draw(frame))?;
        }
        Ok(())
    }
}
