use arrayvec::ArrayVec;

use crate::{
    core::{
        Grid, Piece, PieceKind, Point, Rgba, Spin, below_bottom, hits_filled_block, hits_side,
        try_kick,
    },
    engine::{
        draw::DrawSink,
        input::{Button, ButtonSnapshot, InputTracker},
        queue::PieceQueue,
    },
};

/// Milliseconds between gravity steps.
const FALL_INTERVAL_MS: f32 = 200.0;
/// Gravity accumulates this much faster while soft-dropping.
const SPEED_UP_MODIFIER: f32 = 5.0;
/// Grace period after the piece becomes grounded before it locks.
const LOCK_DELAY_MS: f32 = 500.0;
/// Total budget for lock-delay refreshes on a single piece.
const LOCK_TOLERANCE_MS: f32 = 2000.0;
/// The row-clear sweep blacks out one column this often.
const SWEEP_INTERVAL_MS: f32 = 40.0;
/// Score awarded per cleared row.
const SCORE_PER_ROW: u32 = 10;

/// Vertical gap between stacked pieces in the side lanes.
const PREVIEW_SPACING: i32 = 2;
/// Vertical anchor of the side lanes; previews stack downward from here.
const LANE_ANCHOR_Y: i32 = 6;

/// Column sweep state for the row-clear animation.
#[derive(Debug, Clone, Default)]
struct ClearSweep {
    timer: f32,
    column: i32,
}

/// The whole game: grid, falling piece, hold slot, upcoming queue, timers,
/// pending row clears, and score.
///
/// Exactly one entry point advances it: [`Game::tick`], called once per
/// frame by the external driver with that frame's time delta (pre-clamped by
/// the caller, the simulation does not re-clamp) and button snapshot. The
/// tick is atomic; draw commands emitted at its end always reflect the
/// post-resolution state.
///
/// There is no recoverable-error path in here. Impossible situations (a
/// piece locking partially off-grid, spawning atop filled cells) are
/// tolerated by skipping the offending writes; the simulation always keeps
/// progressing.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    queue: PieceQueue,
    input: InputTracker,
    falling: Option<Piece>,
    held: Option<PieceKind>,
    swapped_this_drop: bool,
    lock_delay: f32,
    lock_tolerance: f32,
    fall_counter: f32,
    pending_rows: ArrayVec<i32, 4>,
    sweep: ClearSweep,
    frozen: bool,
    score: u32,
}

impl Game {
    /// Creates a game on the default 10x24 grid with a random piece seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Grid::default(), PieceQueue::new())
    }

    /// Like [`Game::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_parts(Grid::default(), PieceQueue::with_seed(seed))
    }

    /// Creates a game from an explicit grid and queue, mainly for tests and
    /// non-default dimensions.
    #[must_use]
    pub fn with_parts(grid: Grid, mut queue: PieceQueue) -> Self {
        let falling = Piece::spawn(queue.take_next());
        Self {
            grid,
            queue,
            input: InputTracker::default(),
            falling: Some(falling),
            held: None,
            swapped_this_drop: false,
            lock_delay: LOCK_DELAY_MS,
            lock_tolerance: LOCK_TOLERANCE_MS,
            fall_counter: 0.0,
            pending_rows: ArrayVec::new(),
            sweep: ClearSweep::default(),
            frozen: false,
            score: 0,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn upcoming_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.preview()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True while the row-clear sweep is playing and piece input is
    /// suppressed.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Rows marked for clearing, bottom-up.
    #[must_use]
    pub fn pending_rows(&self) -> &[i32] {
        &self.pending_rows
    }

    /// Advances the simulation by one frame.
    ///
    /// `dt` is the frame's time delta in milliseconds; `buttons` is the
    /// current polled button state. Draw commands for everything visible
    /// this frame are emitted through `sink` at the end of the tick.
    ///
    /// The resolution order within a tick is load-bearing and kept as one
    /// sequence: restart, input edges, hold, rotation + kick, horizontal
    /// motion, groundedness, commit, fall/lock clocks, hard drop, clear
    /// sweep, draw emission.
    #[expect(clippy::too_many_lines)]
    pub fn tick(&mut self, dt: f32, buttons: &ButtonSnapshot, sink: &mut impl DrawSink) {
        let edges = self.input.rising_edges(buttons);

        // Restart takes effect immediately; the rest of the tick runs
        // against the fresh state.
        if edges.pressed(Button::R) {
            self.restart();
        }

        let mut move_intent = 0;
        if edges.pressed(Button::A) {
            move_intent = -1;
        }
        if edges.pressed(Button::D) {
            move_intent = 1;
        }
        if edges.pressed(Button::A) && edges.pressed(Button::D) {
            move_intent = 0;
        }
        let repeat = self.input.auto_shift(buttons, dt);
        if repeat != 0 {
            move_intent = repeat;
        }

        // Hold/swap, at most once per drop and never while frozen.
        if edges.pressed(Button::Space)
            && !self.swapped_this_drop
            && !self.frozen
            && let Some(piece) = self.falling
        {
            let previously_held = self.held.replace(piece.kind);
            match previously_held {
                Some(kind) => self.falling = Some(Piece::spawn(kind)),
                None => self.spawn_next(),
            }
            self.swapped_this_drop = true;
        }

        let mut spin_intent = None;
        if edges.pressed(Button::J) {
            spin_intent = Some(Spin::Left);
        }
        if edges.pressed(Button::L) {
            spin_intent = Some(Spin::Right);
        }
        if edges.pressed(Button::J) && edges.pressed(Button::L) {
            spin_intent = None;
        }

        let soft_dropping = buttons.is_down(Button::S);
        let hard_drop = edges.pressed(Button::W);

        // Resolve rotation, horizontal motion, and groundedness on scratch
        // copies before committing anything to the real piece.
        let mut accepted_move = 0;
        let mut accepted_spin = None;
        let mut kick_offset = Point::default();
        let mut grounded = false;
        if let Some(falling) = self.falling {
            let mut probe = falling;
            let prev_rotation = probe.rotation;
            if let Some(spin) = spin_intent {
                probe.rotate(spin);
            }
            if try_kick(&mut probe, prev_rotation, &self.grid) {
                accepted_spin = spin_intent;
                kick_offset = probe.position - falling.position;
            }

            // Horizontal intent is accepted only if fully legal; there is
            // no partial slide.
            probe.position.x += move_intent;
            if !hits_side(&probe, &self.grid) && !hits_filled_block(&probe, &self.grid) {
                accepted_move = move_intent;
            }

            // Grounded probe: original orientation, accepted horizontal
            // motion, one cell down.
            let mut below = falling;
            below.position.x += accepted_move;
            below.position.y -= 1;
            grounded = below_bottom(&below) || hits_filled_block(&below, &self.grid);
        }

        // Commit movement and run the fall/lock clock.
        let mut locked = false;
        if let Some(mut falling) = self.falling {
            if !self.frozen {
                if accepted_move != 0 {
                    falling.position.x += accepted_move;
                    if self.lock_tolerance > 0.0 {
                        self.lock_delay = LOCK_DELAY_MS;
                    }
                }
                if let Some(spin) = accepted_spin {
                    falling.rotate(spin);
                    if self.lock_tolerance > 0.0 {
                        self.lock_delay = LOCK_DELAY_MS;
                    }
                }
            }
            falling.position += kick_offset;
            self.falling = Some(falling);

            if grounded {
                self.lock_delay -= dt;
                self.lock_tolerance -= dt;
                if self.lock_delay <= 0.0 {
                    self.lock_falling();
                    locked = true;
                }
            } else {
                if !self.frozen {
                    self.fall_counter += if soft_dropping {
                        dt * SPEED_UP_MODIFIER
                    } else {
                        dt
                    };
                }
                if self.fall_counter >= FALL_INTERVAL_MS {
                    if let Some(piece) = &mut self.falling {
                        piece.position.y -= 1;
                    }
                    self.fall_counter -= FALL_INTERVAL_MS;
                }
            }
        }

        // Ghost piece, and hard drop straight onto it.
        let mut ghost = None;
        if let Some(falling) = self.falling {
            let landed = self.drop_position(&falling);
            if hard_drop && !self.frozen {
                if let Some(piece) = &mut self.falling {
                    piece.position = landed.position;
                }
                self.lock_falling();
                locked = true;
            }
            ghost = Some(landed);
        }

        // Row clears freeze the game for the sweep; otherwise a lock this
        // tick respawns immediately.
        if self.pending_rows.is_empty() {
            self.frozen = false;
            if locked {
                self.spawn_next();
            }
        } else {
            self.frozen = true;
            if self.advance_sweep(dt) {
                self.compact_marked_rows();
                self.spawn_next();
            }
        }

        self.emit_draws(ghost.as_ref(), sink);
    }

    fn restart(&mut self) {
        self.grid.reset();
        self.held = None;
        self.swapped_this_drop = false;
        self.queue.refill();
        self.pending_rows.clear();
        self.sweep = ClearSweep::default();
        self.frozen = false;
        self.lock_delay = LOCK_DELAY_MS;
        self.lock_tolerance = LOCK_TOLERANCE_MS;
        self.fall_counter = 0.0;
        self.spawn_next();
        // The score deliberately survives restarts.
    }

    fn spawn_next(&mut self) {
        self.falling = Some(Piece::spawn(self.queue.take_next()));
    }

    /// Writes the falling piece into the grid and marks filled rows.
    ///
    /// Blocks outside the grid are skipped rather than rejected; a partially
    /// off-grid lock simply loses those blocks.
    fn lock_falling(&mut self) {
        let Some(piece) = self.falling.take() else {
            return;
        };
        for point in piece.block_positions() {
            if !self.grid.valid_point(point) {
                continue;
            }
            let cell = self.grid.cell_at_mut(point);
            cell.filled = true;
            cell.color = piece.kind.color();
        }

        self.mark_filled_rows();

        self.swapped_this_drop = false;
        self.lock_delay = LOCK_DELAY_MS;
        self.lock_tolerance = LOCK_TOLERANCE_MS;
    }

    /// Scans for fully-filled rows, records them bottom-up, and scores them.
    fn mark_filled_rows(&mut self) {
        self.pending_rows.clear();
        for row in 0..self.grid.rows() {
            if self.grid.row_filled(row) && self.pending_rows.try_push(row).is_err() {
                // A single lock can never complete more than 4 rows.
                break;
            }
        }

        #[expect(clippy::cast_possible_truncation)]
        let marked = self.pending_rows.len() as u32;
        self.score += marked * SCORE_PER_ROW;
    }

    /// Advances the column-by-column reveal; returns true once every column
    /// has been swept.
    fn advance_sweep(&mut self, dt: f32) -> bool {
        self.sweep.timer += dt;
        if self.sweep.timer >= SWEEP_INTERVAL_MS {
            for &row in &self.pending_rows {
                self.grid
                    .cell_at_mut(Point::new(self.sweep.column, row))
                    .color = Rgba::BLACK;
            }
            self.sweep.column += 1;
            self.sweep.timer -= SWEEP_INTERVAL_MS;
        }

        if self.sweep.column >= self.grid.columns() {
            self.sweep.column = 0;
            return true;
        }
        false
    }

    /// Removes the marked rows, top-most first so the remaining indices stay
    /// valid, shifting everything above each removed row down by one.
    fn compact_marked_rows(&mut self) {
        while let Some(row) = self.pending_rows.pop() {
            self.grid.remove_row(row);
        }
    }

    /// Where the falling piece would land on an immediate hard drop.
    fn drop_position(&self, piece: &Piece) -> Piece {
        let mut landed = *piece;
        loop {
            landed.position.y -= 1;
            if below_bottom(&landed) || hits_filled_block(&landed, &self.grid) {
                break;
            }
        }
        landed.position.y += 1;
        landed
    }

    fn emit_draws(&self, ghost: Option<&Piece>, sink: &mut impl DrawSink) {
        if let Some(ghost) = ghost {
            let color = ghost.kind.color().with_alpha(0.25);
            for point in ghost.block_positions() {
                sink.draw_cell_main(point, color);
            }
        }

        for row in 0..self.grid.rows() {
            for column in 0..self.grid.columns() {
                let point = Point::new(column, row);
                let cell = self.grid.cell_at(point);
                if cell.filled {
                    sink.draw_cell_main(point, cell.color);
                }
            }
        }

        if let Some(falling) = &self.falling {
            let color = falling.kind.color();
            for point in falling.block_positions() {
                sink.draw_cell_main(point, color);
            }
        }

        if let Some(kind) = self.held {
            let alpha = if self.swapped_this_drop { 0.1 } else { 1.0 };
            let color = kind.color().with_alpha(alpha);
            for offset in kind.spawn_points() {
                sink.draw_cell_in_left_lane(Point::new(0, LANE_ANCHOR_Y) + offset, color);
            }
        }

        let mut anchor = Point::new(0, LANE_ANCHOR_Y);
        for kind in self.queue.preview() {
            let color = kind.color();
            for offset in kind.spawn_points() {
                sink.draw_cell_in_right_lane(anchor + offset, color);
            }
            anchor.y -= 2 * PREVIEW_SPACING;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
