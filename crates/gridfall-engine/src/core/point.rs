use derive_more::{Add, AddAssign, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Integer 2D point in grid space.
///
/// `(0, 0)` is the bottom-left cell of the playfield; `x` grows rightward and
/// `y` grows upward. All piece and grid arithmetic stays in integers, so
/// positions are always exact.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Serialize,
    Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3, -2);
        let b = Point::new(-1, 5);
        assert_eq!(a + b, Point::new(2, 3));
        assert_eq!(a - b, Point::new(4, -7));

        let mut c = a;
        c += b;
        assert_eq!(c, Point::new(2, 3));
        c -= b;
        assert_eq!(c, a);
    }
}
