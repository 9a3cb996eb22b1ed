use glam::DAffine2;

use super::Color;

/// An immediate-mode 2D drawing context in the style of a canvas `2d` context.
///
/// Path points are mapped through the current transform when they are added, so
/// a path built under one transform can be filled after `restore`. The state that
/// `save`/`restore` bracket is the transform, both paint styles and the line width.
pub trait Surface {
    /// Width in device pixels.
    fn width(&self) -> u32;
    /// Height in device pixels.
    fn height(&self) -> u32;

    fn save(&mut self);
    /// Pops the last saved state. Does nothing when the stack is empty.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotation in radians.
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    /// The matrix currently mapping user coordinates to device pixels.
    fn transform(&self) -> DAffine2;

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    /// Non-positive and non-finite widths are ignored.
    fn set_line_width(&mut self, width: f64);
    fn fill_style(&self) -> Color;
    fn stroke_style(&self) -> Color;
    fn line_width(&self) -> f64;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool);
    fn close_path(&mut self);
    /// Fills every subpath of the current path with the non-zero rule.
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Resets the covered pixels to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Reads back one device pixel as `[r, g, b, a]`.
    fn get_rgb(&self, x: u32, y: u32) -> Option<[u8; 4]>;
}
