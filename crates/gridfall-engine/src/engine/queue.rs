use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::PieceKind;

/// Number of upcoming pieces the queue shows ahead of the spawned one.
pub const QUEUE_LEN: usize = 6;

/// Upcoming-piece queue with immediate-repeat avoidance.
///
/// A fixed-capacity circular buffer of piece kinds plus a read cursor. Each
/// draw picks a uniform raw value in `[0, 6]` and redraws once if it matches
/// the previous raw draw (tracked across all draws, independent of queue
/// position). Two identical pieces in a row are therefore possible, three are
/// not. This is a mild anti-streak heuristic, not a true 7-bag.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    slots: [PieceKind; QUEUE_LEN],
    cursor: usize,
    last_raw: Option<u8>,
}

impl PieceQueue {
    /// Creates a queue with a seed from the thread-local random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a queue with an explicit seed; the same seed always produces
    /// the same piece sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut queue = Self {
            rng: Pcg32::seed_from_u64(seed),
            slots: [PieceKind::I; QUEUE_LEN],
            cursor: 0,
            last_raw: None,
        };
        queue.refill();
        queue
    }

    /// Refills every slot with fresh draws and rewinds the cursor.
    pub fn refill(&mut self) {
        for slot in 0..QUEUE_LEN {
            self.slots[slot] = self.draw();
        }
        self.cursor = 0;
    }

    fn draw(&mut self) -> PieceKind {
        let mut raw: u8 = self.rng.random_range(0..7);
        // One redraw only; a second consecutive repeat is accepted.
        if Some(raw) == self.last_raw {
            raw = self.rng.random_range(0..7);
        }
        self.last_raw = Some(raw);
        PieceKind::ALL[usize::from(raw)]
    }

    /// Returns the kind at the read cursor, back-filling the vacated slot so
    /// the preview always shows [`QUEUE_LEN`] upcoming pieces.
    pub fn take_next(&mut self) -> PieceKind {
        let kind = self.slots[self.cursor];
        self.slots[self.cursor] = self.draw();
        self.cursor = (self.cursor + 1) % QUEUE_LEN;
        kind
    }

    /// Upcoming pieces in draw order.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        (0..QUEUE_LEN).map(move |ahead| self.slots[(self.cursor + ahead) % QUEUE_LEN])
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}
