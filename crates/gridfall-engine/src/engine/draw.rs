use crate::core::{Point, Rgba};

/// Presentation collaborator the simulation emits draw commands to.
///
/// The simulation calls these once per visible block per tick, after all
/// state resolution, so every call within one tick reflects the same
/// consistent state. The sink owns coordinate-to-pixel mapping, batching,
/// and presentation; the simulation makes no assumption about when it
/// actually flushes to a display.
///
/// The two lanes use their own small coordinate spaces, independent of the
/// main playfield: the left lane shows the held piece, the right lane the
/// upcoming-piece preview.
pub trait DrawSink {
    /// Draws one cell of the main playfield.
    fn draw_cell_main(&mut self, position: Point, color: Rgba);

    /// Draws one cell in the hold lane beside the playfield.
    fn draw_cell_in_left_lane(&mut self, position: Point, color: Rgba);

    /// Draws one cell in the preview lane beside the playfield.
    fn draw_cell_in_right_lane(&mut self, position: Point, color: Rgba);
}
