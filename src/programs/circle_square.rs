use super::Program;
use crate::engine::animation::Animated;
use crate::error::SceneResult;
use crate::surface::{Color, Surface, SurfaceExt};

const CIRCLE_RADIUS: f64 = 100.0;
const SQUARE_SIDE: f64 = 100.0;

/// A black circle with a yellow square on top, both centred.
#[derive(Debug, Default)]
pub struct CircleSquareProgram;

impl CircleSquareProgram {
    pub fn new() -> Self {
        Self
    }
}

impl Animated for CircleSquareProgram {
    fn update_frame(&mut self, _frame_number: u64) {}

    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult {
        let cx = surface.width() as f64 / 2.0;
        let cy = surface.height() as f64 / 2.0;

        surface.fill_background(Color::WHITE);
        surface.set_fill_style(Color::BLACK);
        surface.fill_circle(cx, cy, CIRCLE_RADIUS);
        surface.set_fill_style(Color::YELLOW);
        surface.fill_rect(
            cx - SQUARE_SIDE / 2.0,
            cy - SQUARE_SIDE / 2.0,
            SQUARE_SIDE,
            SQUARE_SIDE,
        );
        Ok(())
    }
}

impl Program for CircleSquareProgram {
    fn name(&self) -> &str {
        "circle-square"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    #[test]
    fn square_sits_on_top_of_the_circle() {
        let mut surface = RasterSurface::new(600, 600, Color::GREY).unwrap();
        CircleSquareProgram::new().setup(&mut surface).unwrap();

        assert_eq!(surface.get_rgb(300, 300), Some(Color::YELLOW.to_array()));
        assert_eq!(surface.get_rgb(300, 210), Some(Color::BLACK.to_array()));
        assert_eq!(surface.get_rgb(10, 10), Some(Color::WHITE.to_array()));
    }
}
