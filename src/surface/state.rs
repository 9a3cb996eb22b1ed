use glam::{DAffine2, DVec2};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DrawState {
    pub transform: DAffine2,
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: DAffine2::IDENTITY,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
        }
    }
}

impl DrawState {
    /// Line width as it lands on the device under the current transform.
    pub fn device_line_width(&self) -> f64 {
        self.line_width * self.transform.matrix2.determinant().abs().sqrt()
    }
}

/// The save/restore stack shared by every surface implementation.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current.transform *= DAffine2::from_translation(DVec2::new(dx, dy));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.current.transform *= DAffine2::from_angle(radians);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current.transform *= DAffine2::from_scale(DVec2::new(sx, sy));
    }

    pub fn set_fill(&mut self, color: Color) {
        self.current.fill = color;
    }

    pub fn set_stroke(&mut self, color: Color) {
        self.current.stroke = color;
    }

    /// Returns false when the width was rejected.
    pub fn set_line_width(&mut self, width: f64) -> bool {
        if width.is_finite() && width > 0.0 {
            self.current.line_width = width;
            true
        } else {
            false
        }
    }

    pub fn map(&self, x: f64, y: f64) -> DVec2 {
        self.current.transform.transform_point2(DVec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_on_empty_stack_keeps_state() {
        let mut stack = StateStack::default();
        stack.set_fill(Color::RED);
        stack.restore();
        assert_eq!(stack.current().fill, Color::RED);
    }

    #[test]
    fn later_transforms_apply_to_points_first() {
        let mut stack = StateStack::default();
        stack.translate(10.0, 0.0);
        stack.scale(2.0, 2.0);
        let p = stack.map(1.0, 1.0);
        assert!(p.abs_diff_eq(DVec2::new(12.0, 2.0), 1e-12));
    }

    #[test]
    fn invalid_line_widths_are_ignored() {
        let mut stack = StateStack::default();
        assert!(stack.set_line_width(2.0));
        assert!(!stack.set_line_width(0.0));
        assert!(!stack.set_line_width(f64::NAN));
        assert_eq!(stack.current().line_width, 2.0);
    }
}
