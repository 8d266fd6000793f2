use std::collections::HashMap;

use gridfall_engine::{DrawSink, Point, Rgba};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Terminal cells are taller than wide; one grid cell spans two columns.
const CELL_WIDTH: u16 = 2;

/// Highest lane `y` coordinate that is still on screen. Lane pieces are
/// anchored at `y = 6` and stack downward from there.
const LANE_TOP_Y: i32 = 7;
/// Lane `x` coordinates run from -1 to 2 (piece offsets around the pivot).
const LANE_COLUMNS: i32 = 4;
/// Deep enough for the full preview stack.
const LANE_ROWS: i32 = 22;

/// Collects one tick's draw commands for later rendering.
///
/// Later draws win: the simulation emits the ghost before the grid and the
/// grid before the falling piece, so overlaps resolve in that order.
#[derive(Debug, Default)]
pub struct CellCanvas {
    main: HashMap<Point, Color>,
    left: HashMap<Point, Color>,
    right: HashMap<Point, Color>,
}

impl CellCanvas {
    pub fn clear(&mut self) {
        self.main.clear();
        self.left.clear();
        self.right.clear();
    }

    #[must_use]
    pub fn playfield(&self, columns: i32, rows: i32) -> PlayfieldDisplay<'_> {
        PlayfieldDisplay {
            cells: &self.main,
            columns,
            rows,
        }
    }

    #[must_use]
    pub fn hold_lane(&self) -> LaneDisplay<'_> {
        LaneDisplay { cells: &self.left }
    }

    #[must_use]
    pub fn preview_lane(&self) -> LaneDisplay<'_> {
        LaneDisplay { cells: &self.right }
    }
}

impl DrawSink for CellCanvas {
    fn draw_cell_main(&mut self, position: Point, color: Rgba) {
        self.main.insert(position, to_terminal_color(color));
    }

    fn draw_cell_in_left_lane(&mut self, position: Point, color: Rgba) {
        self.left.insert(position, to_terminal_color(color));
    }

    fn draw_cell_in_right_lane(&mut self, position: Point, color: Rgba) {
        self.right.insert(position, to_terminal_color(color));
    }
}

/// Terminals have no alpha channel; translucency is approximated by scaling
/// the color toward the black background.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_terminal_color(color: Rgba) -> Color {
    let scale = |channel: f32| (channel * color.a * 255.0).round() as u8;
    Color::Rgb(scale(color.r), scale(color.g), scale(color.b))
}

fn render_block(buf: &mut Buffer, area: Rect, column: u16, row: u16, color: Option<Color>) {
    if column + CELL_WIDTH > area.width || row >= area.height {
        return;
    }
    let x = area.x + column;
    let y = area.y + row;
    match color {
        Some(color) => {
            for offset in 0..CELL_WIDTH {
                if let Some(cell) = buf.cell_mut((x + offset, y)) {
                    cell.set_symbol("█");
                    cell.set_fg(color);
                }
            }
        }
        None => {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(".");
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}

/// The main playfield, `y` up in grid space and down on screen.
#[derive(Debug)]
pub struct PlayfieldDisplay<'a> {
    cells: &'a HashMap<Point, Color>,
    columns: i32,
    rows: i32,
}

impl PlayfieldDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.columns as u16 * CELL_WIDTH
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.rows as u16
    }
}

impl Widget for &PlayfieldDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..self.rows {
            let row = (self.rows - 1 - y) as u16;
            for x in 0..self.columns {
                let color = self.cells.get(&Point::new(x, y)).copied();
                render_block(buf, area, x as u16 * CELL_WIDTH, row, color);
            }
        }
    }
}

/// A side lane (held piece or upcoming previews) in its own small
/// coordinate space.
#[derive(Debug)]
pub struct LaneDisplay<'a> {
    cells: &'a HashMap<Point, Color>,
}

impl LaneDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn width() -> u16 {
        LANE_COLUMNS as u16 * CELL_WIDTH
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn height() -> u16 {
        LANE_ROWS as u16
    }
}

impl Widget for &LaneDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (&point, &color) in self.cells {
            let column = point.x + 1;
            let row = LANE_TOP_Y - point.y;
            if !(0..LANE_COLUMNS).contains(&column) || !(0..LANE_ROWS).contains(&row) {
                continue;
            }
            render_block(
                buf,
                area,
                column as u16 * CELL_WIDTH,
                row as u16,
                Some(color),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_scales_toward_black() {
        let full = to_terminal_color(Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(full, Color::Rgb(255, 128, 0));

        let ghost = to_terminal_color(Rgba::new(1.0, 0.0, 1.0, 0.25));
        assert_eq!(ghost, Color::Rgb(64, 0, 64));
    }

    #[test]
    fn test_later_draws_overwrite_earlier() {
        let mut canvas = CellCanvas::default();
        canvas.draw_cell_main(Point::new(3, 4), Rgba::new(1.0, 0.0, 0.0, 0.25));
        canvas.draw_cell_main(Point::new(3, 4), Rgba::new(1.0, 0.0, 0.0, 1.0));

        assert_eq!(
            canvas.main.get(&Point::new(3, 4)),
            Some(&Color::Rgb(255, 0, 0)),
        );
    }

    #[test]
    fn test_playfield_flips_vertically() {
        let mut canvas = CellCanvas::default();
        canvas.draw_cell_main(Point::new(0, 0), Rgba::WHITE);

        let display = canvas.playfield(10, 24);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);

        // Grid bottom row lands on the last screen row.
        assert_eq!(buf.cell((0, 23)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), ".");
    }
}
