//! Rectangular bounds in device pixels.

use glam::Vec2;

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left)
    pub x: f32,
    /// Y position (top)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Check if a point is inside the rect (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the two rects share any interior area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Widen the rect by `scale` around its horizontal center.
    ///
    /// Bars grow sideways on hover; their baseline and top stay put.
    pub fn scale_width(&self, scale: f32) -> Self {
        let width = self.width * scale;
        Self {
            x: self.x - (width - self.width) * 0.5,
            width,
            ..*self
        }
    }

    /// Scale the rect by `scale` around its center.
    pub fn scale_about_center(&self, scale: f32) -> Self {
        let center = self.center();
        let width = self.width * scale;
        let height = self.height * scale;
        Self {
            x: center.x - width * 0.5,
            y: center.y - height * 0.5,
            width,
            height,
        }
    }

    /// Divide every component by `factor` (device pixels to CSS pixels).
    pub fn scaled_down(&self, factor: f32) -> Self {
        if factor <= 0.0 || !factor.is_finite() {
            return *self;
        }
        Self {
            x: self.x / factor,
            y: self.y / factor,
            width: self.width / factor,
            height: self.height / factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 15.0)));
        assert!(!rect.contains(Vec2::new(30.1, 12.0)));
    }

    #[test]
    fn test_scale_width_keeps_center() {
        let rect = Rect::new(100.0, 50.0, 20.0, 40.0);
        let wide = rect.scale_width(1.5);
        assert_eq!(wide.center(), rect.center());
        assert_eq!(wide.width, 30.0);
        assert_eq!(wide.y, rect.y);
        assert_eq!(wide.height, rect.height);
    }

    #[test]
    fn test_overlaps_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 2.0, 2.0)));
    }
}
