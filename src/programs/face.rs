use std::f64::consts::TAU;

use glam::DVec2;

use super::Program;
use crate::engine::animation::Animated;
use crate::error::SceneResult;
use crate::surface::{Color, Surface, SurfaceExt};

/// A static cartoon face on a 600x600 canvas.
#[derive(Debug, Default)]
pub struct FaceProgram;

impl FaceProgram {
    pub fn new() -> Self {
        Self
    }
}

fn outlined_circle(
    surface: &mut dyn Surface,
    center: DVec2,
    radius: f64,
    fill: Color,
    stroke_width: f64,
    stroke: Color,
) {
    surface.begin_path();
    surface.arc(center.x, center.y, radius, 0.0, TAU, false);
    surface.set_fill_style(fill);
    surface.fill();
    // A zero width keeps the previous pen, as on a canvas.
    surface.set_line_width(stroke_width);
    surface.set_stroke_style(stroke);
    surface.stroke();
    surface.close_path();
}

fn tooth(surface: &mut dyn Surface, corners: [DVec2; 4]) {
    surface.set_fill_style(Color::WHITE);
    surface.set_stroke_style(Color::GREY);
    surface.set_line_width(1.3);
    surface.fill_poly(&corners);
    surface.stroke();
}

fn cheek(surface: &mut dyn Surface, center: DVec2, start: f64, end: f64) {
    surface.begin_path();
    surface.arc(center.x, center.y, 10.0, start, end, false);
    surface.set_stroke_style(Color::BLACK);
    surface.set_line_width(2.0);
    surface.stroke();
    surface.close_path();
}

impl Animated for FaceProgram {
    fn update_frame(&mut self, _frame_number: u64) {}

    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult {
        surface.clear_rect(0.0, 0.0, surface.width() as f64, surface.height() as f64);

        outlined_circle(surface, DVec2::new(300.0, 300.0), 100.0, Color::RED, 2.0, Color::BLACK);
        for (x, pupil_x, glint_x) in [(260.0, 257.0, 252.0), (340.0, 337.0, 332.0)] {
            outlined_circle(surface, DVec2::new(x, 270.0), 20.0, Color::WHITE, 0.0, Color::WHITE);
            let pupil = DVec2::new(pupil_x, 267.0);
            outlined_circle(surface, pupil, 10.0, Color::BLACK, 0.0, Color::BLACK);
            let glint = DVec2::new(glint_x, 263.0);
            outlined_circle(surface, glint, 2.0, Color::WHITE, 0.0, Color::WHITE);
        }

        surface.begin_path();
        surface.move_to(250.0, 350.0);
        surface.bezier_curve_to(270.0, 370.0, 300.0, 400.0, 350.0, 350.0);
        surface.set_fill_style(Color::BLACK);
        surface.fill();
        surface.close_path();

        surface.begin_path();
        surface.move_to(250.0, 350.0);
        surface.bezier_curve_to(300.0, 360.0, 300.0, 360.0, 360.0, 350.0);
        surface.set_fill_style(Color::RED);
        surface.fill();

        tooth(
            surface,
            [
                DVec2::new(290.0, 357.0),
                DVec2::new(290.0, 368.0),
                DVec2::new(297.0, 368.0),
                DVec2::new(297.0, 358.0),
            ],
        );
        tooth(
            surface,
            [
                DVec2::new(297.0, 358.0),
                DVec2::new(297.0, 368.0),
                DVec2::new(308.0, 368.0),
                DVec2::new(308.0, 357.0),
            ],
        );

        cheek(surface, DVec2::new(240.0, 350.0), 5.5, 7.32);
        cheek(surface, DVec2::new(356.0, 352.0), 2.3, 4.0);
        Ok(())
    }
}

impl Program for FaceProgram {
    fn name(&self) -> &str {
        "face"
    }
}
