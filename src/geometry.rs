//! Axis-aligned rectangle math.

use crate::config::EPS;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with its origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge X coordinate.
    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    /// Get the top edge Y coordinate.
    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the interiors of two rectangles intersect. Shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let x_overlap = self.x < other.x_max() - EPS && other.x < self.x_max() - EPS;
        let y_overlap = self.y < other.y_max() - EPS && other.y < self.y_max() - EPS;
        x_overlap && y_overlap
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.x_max() <= self.x_max() + EPS
            && other.y_max() <= self.y_max() + EPS
    }

    /// Rectangle grown by `amount` on its right and top edges.
    pub fn inflated(&self, amount: f64) -> Rect {
        Rect::new(self.x, self.y, self.width + amount, self.height + amount)
    }
}

/// Check a rectangle against a set of occupied rectangles.
pub fn overlaps_any(rect: &Rect, occupied: &[Rect]) -> bool {
    occupied.iter().any(|used| rect.overlaps(used))
}

/// Sum of rectangle areas.
pub fn total_area(rects: &[Rect]) -> f64 {
    rects.iter().map(Rect::area).sum()
}

/// Width / height ratio, always >= 1. Degenerate rectangles return infinity.
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    let (long, short) = if width >= height {
        (width, height)
    } else {
        (height, width)
    };
    if short <= 0.0 {
        f64::INFINITY
    } else {
        long / short
    }
}
