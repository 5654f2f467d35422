use crate::rect::Rect;

/// Maps a window frame from one screen's visible frame onto another's.
pub trait ScreenTranslate {
    fn apply(&self, window: &Rect) -> Rect;
}

/// Scales and offsets a window so it keeps its relative position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRatio {
    old: Rect,
    new: Rect,
    scale_x: f64,
    scale_y: f64,
}

impl FrameRatio {
    pub fn new(old: Rect, new: Rect) -> Self {
        Self {
            old,
            new,
            scale_x: new.width / old.width,
            scale_y: new.height / old.height,
        }
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }
}

impl ScreenTranslate for FrameRatio {
    fn apply(&self, window: &Rect) -> Rect {
        Rect {
            x: self.new.x + (window.x - self.old.x) * self.scale_x,
            y: self.new.y + (window.y - self.old.y) * self.scale_y,
            width: window.width * self.scale_x,
            height: window.height * self.scale_y,
        }
    }
}

/// Offsets a window to the same position on the new screen, keeping its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMove {
    dx: f64,
    dy: f64,
}

impl FrameMove {
    pub fn new(old: Rect, new: Rect) -> Self {
        Self {
            dx: new.x - old.x,
            dy: new.y - old.y,
        }
    }
}

impl ScreenTranslate for FrameMove {
    fn apply(&self, window: &Rect) -> Rect {
        Rect {
            x: window.x + self.dx,
            y: window.y + self.dy,
            ..*window
        }
    }
}
