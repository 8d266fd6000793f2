use crossterm::event::{Event, KeyCode, KeyEventKind};
use gridfall_engine::Game;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::Text,
    widgets::Block,
};

use crate::{
    keys::KeyTracker,
    tui::App,
    view::{CellCanvas, LaneDisplay},
};

const HELP_TEXT: &str = "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Hard Drop) | \
     J L (Rotate) | Space (Hold) | R (Restart) | Q (Quit)";

/// The interactive game: one simulation, one key tracker, and the canvas
/// holding the latest tick's draw commands.
#[derive(Debug)]
pub struct PlayApp {
    game: Game,
    keys: KeyTracker,
    canvas: CellCanvas,
    exiting: bool,
}

impl PlayApp {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let game = match seed {
            Some(seed) => Game::with_seed(seed),
            None => Game::new(),
        };
        Self {
            game,
            keys: KeyTracker::default(),
            canvas: CellCanvas::default(),
            exiting: false,
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.exiting
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(key) = event.as_key_event() {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                self.exiting = true;
                return;
            }
            self.keys.handle_key(key);
        }
    }

    fn update(&mut self, dt: f32) {
        let buttons = self.keys.tick_snapshot();
        self.canvas.clear();
        self.game.tick(dt, &buttons, &mut self.canvas);
    }

    fn draw(&self, frame: &mut Frame) {
        let grid = self.game.grid();
        let playfield = self.canvas.playfield(grid.columns(), grid.rows());

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(playfield.height() + 2), Constraint::Length(1)])
                .areas(frame.area());
        let [hold_area, field_area, next_area] = Layout::horizontal([
            Constraint::Length(LaneDisplay::width() + 2),
            Constraint::Length(playfield.width() + 2),
            Constraint::Length(LaneDisplay::width() + 2),
        ])
        .flex(Flex::Center)
        .areas(main_area);

        let hold_block = Block::bordered().title("Hold");
        let hold_lane = self.canvas.hold_lane();
        frame.render_widget(&hold_block, hold_area);
        frame.render_widget(&hold_lane, hold_block.inner(hold_area));

        let field_block = Block::bordered().title(format!("Score: {}", self.game.score()));
        frame.render_widget(&field_block, field_area);
        frame.render_widget(&playfield, field_block.inner(field_area));

        let next_block = Block::bordered().title("Next");
        let preview_lane = self.canvas.preview_lane();
        frame.render_widget(&next_block, next_area);
        frame.render_widget(&preview_lane, next_block.inner(next_area));

        let help = Text::from(HELP_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help, help_area);
    }
}
