//! Pure collision predicates and the wall-kick resolution search.

use super::{
    grid::Grid,
    piece::{Piece, PieceKind, Rotation},
    point::Point,
};

/// Kick candidates per rotation state for the default and I-piece tables.
const KICK_TESTS: usize = 5;
/// The O-piece pivots around its own center; a single offset per state keeps
/// it visually stationary.
const O_KICK_TESTS: usize = 1;

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// SRS-style offset data, one row of candidates per rotation state
/// (0, R, 2, L). The applied kick for a rotation from `prev` to `curr` is
/// `table[prev][i] - table[curr][i]`, tried in order.
#[rustfmt::skip]
const DEFAULT_OFFSETS: [Point; 4 * KICK_TESTS] = [
    p(0, 0), p( 0, 0), p( 0,  0), p(0, 0), p( 0, 0), // 0
    p(0, 0), p( 1, 0), p( 1, -1), p(0, 2), p( 1, 2), // R
    p(0, 0), p( 0, 0), p( 0,  0), p(0, 0), p( 0, 0), // 2
    p(0, 0), p(-1, 0), p(-1, -1), p(0, 2), p(-1, 2), // L
];

#[rustfmt::skip]
const I_OFFSETS: [Point; 4 * KICK_TESTS] = [
    p( 0, 0), p(-1, 0), p( 2, 0), p(-1,  0), p( 2,  0), // 0
    p(-1, 0), p( 0, 0), p( 0, 0), p( 0,  1), p( 0, -2), // R
    p(-1, 1), p( 1, 1), p(-2, 1), p( 1,  0), p(-2,  0), // 2
    p( 0, 1), p( 0, 1), p( 0, 1), p( 0, -1), p( 0,  2), // L
];

#[rustfmt::skip]
const O_OFFSETS: [Point; 4 * O_KICK_TESTS] = [
    p( 0,  0), // 0
    p( 0, -1), // R
    p(-1, -1), // 2
    p(-1,  0), // L
];

const fn offset_table(kind: PieceKind) -> (&'static [Point], usize) {
    match kind {
        PieceKind::O => (&O_OFFSETS, O_KICK_TESTS),
        PieceKind::I => (&I_OFFSETS, KICK_TESTS),
        _ => (&DEFAULT_OFFSETS, KICK_TESTS),
    }
}

/// True if any block sits outside the left or right wall.
#[must_use]
pub fn hits_side(piece: &Piece, grid: &Grid) -> bool {
    piece
        .block_positions()
        .any(|point| point.x < 0 || point.x >= grid.columns())
}

/// True if any block is below the floor.
///
/// Only the lower bound is checked: the space above the visible grid is
/// unbounded headroom, so pieces are never rejected for being too high.
#[must_use]
pub fn below_bottom(piece: &Piece) -> bool {
    piece.block_positions().any(|point| point.y < 0)
}

/// True if any in-bounds block overlaps a filled cell.
///
/// Out-of-bounds blocks are skipped; unlike [`Grid::cell_at`], collision
/// checks bounds-check before indexing.
#[must_use]
pub fn hits_filled_block(piece: &Piece, grid: &Grid) -> bool {
    piece
        .block_positions()
        .any(|point| grid.valid_point(point) && grid.cell_at(point).filled)
}

/// Attempts to nudge a just-rotated piece into a legal position.
///
/// `piece` must already carry the new rotation state and transformed block
/// offsets, with `position` still at its pre-rotation value. Candidates are
/// tried strictly in table order and the first one that hits neither a filled
/// block, a side wall, nor the floor wins, leaving `position` shifted by that
/// candidate. If every candidate fails, `position` is left at its pre-kick
/// value and `false` is returned; the caller is expected to revert the
/// rotation.
pub fn try_kick(piece: &mut Piece, prev_rotation: Rotation, grid: &Grid) -> bool {
    let (offsets, tests) = offset_table(piece.kind);
    let prev_row = prev_rotation.index() * tests;
    let curr_row = piece.rotation.index() * tests;

    for test in 0..tests {
        let test_offset = offsets[prev_row + test] - offsets[curr_row + test];

        piece.position += test_offset;
        if hits_filled_block(piece, grid) || hits_side(piece, grid) || below_bottom(piece) {
            piece.position -= test_offset;
            continue;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Spin;

    fn fill(grid: &mut Grid, x: i32, y: i32) {
        grid.cell_at_mut(Point::new(x, y)).filled = true;
    }

    fn piece_at(kind: PieceKind, x: i32, y: i32) -> Piece {
        let mut piece = Piece::spawn(kind);
        piece.position = Point::new(x, y);
        piece
    }

    #[test]
    fn test_hits_side() {
        let grid = Grid::default();
        assert!(!hits_side(&piece_at(PieceKind::T, 5, 5), &grid));
        // T occupies x-1..=x+1; x=0 puts a block at -1.
        assert!(hits_side(&piece_at(PieceKind::T, 0, 5), &grid));
        assert!(hits_side(&piece_at(PieceKind::T, 9, 5), &grid));
    }

    #[test]
    fn test_below_bottom_has_no_upper_bound() {
        assert!(below_bottom(&piece_at(PieceKind::O, 4, -1)));
        assert!(!below_bottom(&piece_at(PieceKind::O, 4, 0)));
        // Far above the visible grid is fine.
        assert!(!below_bottom(&piece_at(PieceKind::O, 4, 1000)));
    }

    #[test]
    fn test_hits_filled_block_skips_out_of_bounds() {
        let mut grid = Grid::default();
        fill(&mut grid, 4, 5);

        assert!(hits_filled_block(&piece_at(PieceKind::O, 4, 5), &grid));
        assert!(!hits_filled_block(&piece_at(PieceKind::O, 0, 5), &grid));
        // Blocks above the grid are skipped, not an error.
        assert!(!hits_filled_block(&piece_at(PieceKind::O, 4, 30), &grid));
    }

    #[test]
    fn test_kick_noop_when_unobstructed() {
        let grid = Grid::default();
        let mut piece = piece_at(PieceKind::T, 5, 5);
        let prev = piece.rotation;
        piece.rotate(Spin::Right);
        assert!(try_kick(&mut piece, prev, &grid));
        assert_eq!(piece.position, Point::new(5, 5));
    }

    #[test]
    fn test_right_wall_kick_shifts_left() {
        let grid = Grid::default();

        // A T resting vertically against the right wall (nub pointing left).
        let mut piece = piece_at(PieceKind::T, 9, 5);
        piece.rotate(Spin::Left);
        assert!(!hits_side(&piece, &grid));

        // Rotating clockwise back to spawn orientation would put a block at
        // column 10; the second default-table candidate shifts it left by 1.
        let prev = piece.rotation;
        piece.rotate(Spin::Right);
        assert!(try_kick(&mut piece, prev, &grid));
        assert_eq!(piece.position, Point::new(8, 5));
    }

    #[test]
    fn test_kick_failure_reverts_position() {
        let mut grid = Grid::default();
        // Block every feasible candidate for the L -> 0 rotation at (9, 5).
        fill(&mut grid, 7, 5);
        fill(&mut grid, 7, 4);
        fill(&mut grid, 7, 7);

        let mut piece = piece_at(PieceKind::T, 9, 5);
        piece.rotate(Spin::Left);
        let prev = piece.rotation;
        piece.rotate(Spin::Right);

        assert!(!try_kick(&mut piece, prev, &grid));
        assert_eq!(piece.position, Point::new(9, 5));
    }

    #[test]
    fn test_kick_is_deterministic() {
        let mut grid = Grid::default();
        fill(&mut grid, 7, 5);

        let make_rotated = || {
            let mut piece = piece_at(PieceKind::T, 9, 5);
            piece.rotate(Spin::Left);
            let prev = piece.rotation;
            piece.rotate(Spin::Right);
            (piece, prev)
        };

        let (mut first, prev) = make_rotated();
        assert!(try_kick(&mut first, prev, &grid));
        for _ in 0..100 {
            let (mut piece, prev) = make_rotated();
            assert!(try_kick(&mut piece, prev, &grid));
            assert_eq!(piece.position, first.position);
        }
    }

    #[test]
    fn test_o_piece_kick_keeps_center() {
        let grid = Grid::default();
        let mut piece = piece_at(PieceKind::O, 4, 5);
        let prev = piece.rotation;
        piece.rotate(Spin::Right);
        assert!(try_kick(&mut piece, prev, &grid));
        // 0 -> R uses offsets (0,0) - (0,-1) = (0,1): the square stays put
        // visually because the rotated offsets shifted down by one.
        assert_eq!(piece.position, Point::new(4, 6));
        let blocks: Vec<_> = piece.block_positions().collect();
        for expected in [p(4, 5), p(5, 5), p(4, 6), p(5, 6)] {
            assert!(blocks.contains(&expected), "missing block {expected:?}");
        }
    }
}
