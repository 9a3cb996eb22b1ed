use std::f64::consts::TAU;

use glam::DVec2;

use super::{Color, Surface};

/// Shape shortcuts available on every [`Surface`].
pub trait SurfaceExt: Surface {
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, TAU, false);
        self.fill();
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, TAU, false);
        self.stroke();
    }

    fn fill_oval(&mut self, x: f64, y: f64, horizontal_radius: f64, vertical_radius: f64) {
        oval_path(self, x, y, horizontal_radius, vertical_radius);
        self.fill();
    }

    fn stroke_oval(&mut self, x: f64, y: f64, horizontal_radius: f64, vertical_radius: f64) {
        oval_path(self, x, y, horizontal_radius, vertical_radius);
        self.stroke();
    }

    /// Fills the closed polygon through `points`. Needs at least three points.
    fn fill_poly(&mut self, points: &[DVec2]) {
        if points.len() < 3 {
            return;
        }
        poly_path(self, points);
        self.fill();
    }

    /// Strokes the closed polygon through `points`. Needs at least two points.
    fn stroke_poly(&mut self, points: &[DVec2]) {
        if points.len() < 2 {
            return;
        }
        poly_path(self, points);
        self.stroke();
    }

    /// Paints the whole device area, ignoring the current transform.
    fn fill_background(&mut self, color: Color) {
        self.save();
        let inverse = self.transform().inverse();
        if inverse.is_finite() {
            let corners = [
                DVec2::ZERO,
                DVec2::new(self.width() as f64, 0.0),
                DVec2::new(self.width() as f64, self.height() as f64),
                DVec2::new(0.0, self.height() as f64),
            ]
            .map(|corner| inverse.transform_point2(corner));
            self.set_fill_style(color);
            self.fill_poly(&corners);
        }
        self.restore();
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}

fn oval_path<S: Surface + ?Sized>(surface: &mut S, x: f64, y: f64, rx: f64, ry: f64) {
    surface.save();
    surface.translate(x, y);
    surface.scale(rx, ry);
    surface.begin_path();
    surface.arc(0.0, 0.0, 1.0, 0.0, TAU, false);
    surface.restore();
}

fn poly_path<S: Surface + ?Sized>(surface: &mut S, points: &[DVec2]) {
    surface.begin_path();
    surface.move_to(points[0].x, points[0].y);
    for point in &points[1..] {
        surface.line_to(point.x, point.y);
    }
    surface.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RasterSurface, RecordingSurface, SurfaceOp};

    #[test]
    fn short_polygons_draw_nothing() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.fill_poly(&[DVec2::ZERO, DVec2::X]);
        surface.stroke_poly(&[DVec2::ZERO]);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn fill_poly_closes_then_fills() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.fill_poly(&[DVec2::ZERO, DVec2::X, DVec2::Y]);
        let ops = surface.ops();
        assert_eq!(ops[0], SurfaceOp::BeginPath);
        assert_eq!(ops[4], SurfaceOp::ClosePath);
        assert!(matches!(ops[5], SurfaceOp::Fill(_)));
    }

    #[test]
    fn oval_is_filled_after_restoring_transform() {
        let mut surface = RasterSurface::new(40, 20, Color::WHITE).unwrap();
        surface.set_fill_style(Color::RED);
        surface.fill_oval(20.0, 10.0, 15.0, 5.0);

        assert_eq!(surface.transform(), glam::DAffine2::IDENTITY);
        assert_eq!(surface.get_rgb(32, 10), Some(Color::RED.to_array()));
        assert_eq!(surface.get_rgb(20, 2), Some(Color::WHITE.to_array()));
    }

    #[test]
    fn background_covers_whole_canvas_under_any_transform() {
        let mut surface = RasterSurface::new(16, 16, Color::WHITE).unwrap();
        surface.translate(8.0, 8.0);
        surface.scale(0.25, -0.5);
        surface.fill_background(Color::BLUE);
        assert_eq!(surface.get_rgb(0, 0), Some(Color::BLUE.to_array()));
        assert_eq!(surface.get_rgb(15, 15), Some(Color::BLUE.to_array()));
        assert_eq!(surface.fill_style(), Color::BLACK);
    }
}
