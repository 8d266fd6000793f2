pub use self::{collision::*, color::*, grid::*, piece::*, point::*};

pub(crate) mod collision;
pub(crate) mod color;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod point;
