//! Hit-testing and directional navigation over a sorted box collection.

use crate::graph::FlameBox;
use crate::viewport::VisibleBox;

/// Anything with a half-open rectangle: `[x1, x2) × [y1, y2)`.
pub trait Extent {
    fn x1(&self) -> f64;
    fn x2(&self) -> f64;
    fn y1(&self) -> f64;
    fn y2(&self) -> f64;

    fn contains(&self, x: f64, y: f64) -> bool {
        self.y1() <= y && y < self.y2() && self.x1() <= x && x < self.x2()
    }
}

impl Extent for FlameBox {
    fn x1(&self) -> f64 {
        self.x1
    }
    fn x2(&self) -> f64 {
        self.x2
    }
    fn y1(&self) -> f64 {
        self.y1
    }
    fn y2(&self) -> f64 {
        self.y2
    }
}

impl Extent for VisibleBox {
    fn x1(&self) -> f64 {
        self.x1
    }
    fn x2(&self) -> f64 {
        self.x2
    }
    fn y1(&self) -> f64 {
        self.y1
    }
    fn y2(&self) -> f64 {
        self.y2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Index of the first box containing `(x, y)`.
pub fn box_at<B: Extent>(boxes: &[B], x: f64, y: f64) -> Option<usize> {
    boxes.iter().position(|b| b.contains(x, y))
}

/// Where keyboard focus moves from `boxes[focused]`.
///
/// - left/right: the neighbouring entry, only if it sits on the same row.
/// - up: the nearest preceding entry on a higher row whose x-range encloses
///   the focused box (its closest visible ancestor).
/// - down: the first following entry on a lower row whose x-range lies
///   within the focused box (a descendant).
pub fn neighbor<B: Extent>(boxes: &[B], focused: usize, direction: Direction) -> Option<usize> {
    let f = boxes.get(focused)?;
    match direction {
        Direction::Left => {
            let i = focused.checked_sub(1)?;
            (boxes[i].y1() == f.y1()).then_some(i)
        }
        Direction::Right => {
            let i = focused + 1;
            boxes.get(i).filter(|b| b.y1() == f.y1()).map(|_| i)
        }
        Direction::Up => boxes[..focused]
            .iter()
            .rposition(|b| b.y1() < f.y1() && b.x1() <= f.x1() && b.x2() >= f.x2()),
        Direction::Down => boxes[focused + 1..]
            .iter()
            .position(|b| b.y1() > f.y1() && b.x1() >= f.x1() && b.x2() <= f.x2())
            .map(|i| focused + 1 + i),
    }
}
