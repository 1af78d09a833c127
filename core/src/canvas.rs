/// Canvas size is threaded explicitly through every conversion; the core
/// never queries a display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn to_canvas(&self, x_pct: f32, y_pct: f32) -> (f32, f32) {
        to_canvas(x_pct, y_pct, self.width, self.height)
    }

    pub fn to_percent(&self, point: (f32, f32)) -> (f32, f32) {
        to_percent(point, self.width, self.height)
    }
}

/// Percentage coordinates (0-100 on each axis) to canvas space. One authored
/// level definition renders proportionally on any canvas size through this
/// mapping alone.
pub fn to_canvas(x_pct: f32, y_pct: f32, width: f32, height: f32) -> (f32, f32) {
    (x_pct / 100.0 * width, y_pct / 100.0 * height)
}

/// Exact inverse of `to_canvas` up to floating-point rounding.
pub fn to_percent(point: (f32, f32), width: f32, height: f32) -> (f32, f32) {
    (point.0 / width * 100.0, point.1 / height * 100.0)
}
