use serde::{Deserialize, Serialize};

/// A screen or window region in top-left-origin coordinates.
///
/// Equality is exact on all four fields. The layout cycler relies on this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Portrait when the aspect ratio is at most 1. A square counts as portrait.
    pub fn is_portrait(&self) -> bool {
        self.width / self.height <= 1.0
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Overlapping region, or `None` when the rectangles only touch or are apart.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());

        if max_x <= x || max_y <= y {
            return None;
        }

        Some(Rect::new(x, y, max_x - x, max_y - y))
    }

    /// Convert between bottom-left and top-left origin, given the height
    /// of the screen the coordinate system is anchored to.
    pub fn flip_y(&self, anchor_height: f64) -> Rect {
        Rect {
            y: anchor_height - self.max_y(),
            ..*self
        }
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}
