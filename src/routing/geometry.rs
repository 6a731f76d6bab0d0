use crate::graph::{Node, Position};
use crate::layout::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned node body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn of_node(node: &Node, config: &LayoutConfig) -> Self {
        Self::at(node.position, config.node_width, config.node_height(&node.kind))
    }

    pub fn at(position: Position, width: f64, height: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a horizontal segment from `x1` to `x2` at height `y` passes through the body.
    pub fn crosses_horizontal(&self, x1: f64, x2: f64, y: f64) -> bool {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        self.left() < hi
            && self.right() > lo
            && self.top() <= y
            && y <= self.bottom()
    }
}
