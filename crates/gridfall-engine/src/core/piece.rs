use serde::{Deserialize, Serialize};

use super::{color::Rgba, point::Point};

/// The seven tetromino kinds.
///
/// "No piece" states (the hold slot before the first swap, the falling piece
/// between lock and respawn) are `Option<PieceKind>` at the use sites rather
/// than a sentinel variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All kinds, in the order the randomizer draws raw values.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Canonical spawn-orientation block offsets relative to the pivot.
    ///
    /// These are the canonical shapes; rotation transforms them in place, so
    /// they must cycle exactly back after four quarter turns.
    #[must_use]
    pub const fn spawn_points(self) -> [Point; 4] {
        match self {
            Self::I => [
                Point::new(-1, 0),
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
            ],
            Self::J => [
                Point::new(-1, 1),
                Point::new(-1, 0),
                Point::new(0, 0),
                Point::new(1, 0),
            ],
            Self::L => [
                Point::new(-1, 0),
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
            ],
            Self::O => [
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1),
            ],
            Self::S => [
                Point::new(-1, 0),
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
            ],
            Self::T => [
                Point::new(0, 0),
                Point::new(-1, 0),
                Point::new(1, 0),
                Point::new(0, 1),
            ],
            Self::Z => [
                Point::new(-1, 1),
                Point::new(0, 1),
                Point::new(0, 0),
                Point::new(1, 0),
            ],
        }
    }

    /// Display color for blocks of this kind.
    #[must_use]
    pub const fn color(self) -> Rgba {
        match self {
            Self::I => Rgba::new(0.0, 1.0, 1.0, 1.0),
            Self::J => Rgba::new(0.0, 0.0, 1.0, 1.0),
            Self::L => Rgba::new(1.0, 0.5, 0.0, 1.0),
            Self::O => Rgba::new(1.0, 1.0, 0.0, 1.0),
            Self::S => Rgba::new(0.0, 1.0, 0.0, 1.0),
            Self::T => Rgba::new(1.0, 0.0, 1.0, 1.0),
            Self::Z => Rgba::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

/// One of the four rotation states, cycling 0 → R → 2 → L → 0.
///
/// Transitions happen only via single ±1 steps, never jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    RRight,
    R2,
    RLeft,
}

impl Rotation {
    /// One step clockwise.
    #[must_use]
    pub const fn cw(self) -> Self {
        match self {
            Self::R0 => Self::RRight,
            Self::RRight => Self::R2,
            Self::R2 => Self::RLeft,
            Self::RLeft => Self::R0,
        }
    }

    /// One step counter-clockwise.
    #[must_use]
    pub const fn ccw(self) -> Self {
        match self {
            Self::R0 => Self::RLeft,
            Self::RRight => Self::R0,
            Self::R2 => Self::RRight,
            Self::RLeft => Self::R2,
        }
    }

    /// Row index into the wall-kick offset tables.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::R0 => 0,
            Self::RRight => 1,
            Self::R2 => 2,
            Self::RLeft => 3,
        }
    }
}

/// Rotation direction. `Left` is counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Left,
    Right,
}

/// A tetromino at a specific spot on the grid: the pivot position plus the
/// four block offsets for the current orientation.
///
/// Rotation is an incremental transform of `points`, not a table lookup;
/// only the wall-kick offsets are table-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Point,
    pub rotation: Rotation,
    pub points: [Point; 4],
}

impl Piece {
    /// Pivot cell where new pieces appear (`y = 0` is the bottom row).
    pub const SPAWN_POSITION: Point = Point::new(4, 16);

    /// Creates a piece of `kind` at the spawn position in spawn orientation.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            position: Self::SPAWN_POSITION,
            rotation: Rotation::R0,
            points: kind.spawn_points(),
        }
    }

    /// Absolute grid positions of the four blocks.
    pub fn block_positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|&offset| self.position + offset)
    }

    /// Rotates the piece a quarter turn in place, updating both the rotation
    /// state and every block offset.
    ///
    /// Clockwise maps `(x, y)` to `(y, -x)`; counter-clockwise maps it to
    /// `(-y, x)`. Four applications of either return the exact original
    /// offsets.
    pub fn rotate(&mut self, spin: Spin) {
        match spin {
            Spin::Right => {
                self.rotation = self.rotation.cw();
                for point in &mut self.points {
                    *point = Point::new(point.y, -point.x);
                }
            }
            Spin::Left => {
                self.rotation = self.rotation.ccw();
                for point in &mut self.points {
                    *point = Point::new(-point.y, point.x);
                }
            }
        }
    }
}
