//! Pointer mapping
//!
//! Raw client coordinates come in; each screen's logical coordinate goes out.

use glam::Vec2;

/// An element's client rect
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Angle of the pointer around the element's center (degrees, y down)
pub fn angle_from_center(bounds: &Bounds, client: Vec2) -> f32 {
    let d = client - bounds.center();
    d.y.atan2(d.x).to_degrees()
}

/// Horizontal position as a percentage of the width, kept `padding` px
/// inside both edges
pub fn percent_x(bounds: &Bounds, client_x: f32, padding: f32) -> f32 {
    if bounds.width <= 0.0 {
        return 50.0;
    }
    let max = (bounds.width - padding).max(padding);
    let x = (client_x - bounds.left).clamp(padding, max);
    x / bounds.width * 100.0
}

/// Pixel offset from the element's top-left corner
pub fn local_offset(bounds: &Bounds, client: Vec2) -> Vec2 {
    client - Vec2::new(bounds.left, bounds.top)
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 400.0,
    };

    #[test]
    fn test_angle_from_center_y_down() {
        assert!((angle_from_center(&B, Vec2::new(400.0, 250.0)) - 0.0).abs() < 1e-4);
        assert!((angle_from_center(&B, Vec2::new(300.0, 450.0)) - 90.0).abs() < 1e-4);
        assert!((angle_from_center(&B, Vec2::new(300.0, 50.0)) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_percent_x_is_padded() {
        assert_eq!(percent_x(&B, 300.0, 20.0), 50.0);
        assert_eq!(percent_x(&B, 0.0, 20.0), 5.0);
        assert_eq!(percent_x(&B, 1000.0, 20.0), 95.0);
        assert_eq!(percent_x(&Bounds::default(), 10.0, 20.0), 50.0);
    }

    #[test]
    fn test_local_offset() {
        assert_eq!(local_offset(&B, Vec2::new(110.0, 70.0)), Vec2::new(10.0, 20.0));
        assert_eq!(local_offset(&B, Vec2::new(90.0, 70.0)), Vec2::new(-10.0, 20.0));
    }
}
