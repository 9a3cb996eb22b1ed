use glam::DVec2;

use super::Program;
use crate::engine::animation::Animated;
use crate::engine::input::{InputEvent, Key};
use crate::error::SceneResult;
use crate::geometry::{regular_polygon, PolygonTransform};
use crate::surface::{Color, Surface, SurfaceExt};

const RADIUS: f64 = 150.0;
const INITIAL_ROTATION: f64 = 54.0;

/// The transform sequence bound to digit key `digit`, applied in order about the centre.
pub fn preset(digit: u8) -> Option<Vec<PolygonTransform>> {
    use PolygonTransform::*;

    let steps = match digit {
        1 => vec![Scale(0.5, 0.75)],
        2 => vec![Rotate(24.0)],
        3 => vec![Scale(0.5, 1.0), FlipX],
        4 => vec![Lean(0.25, 0.0)],
        5 => vec![Move(DVec2::new(0.0, -444.0)), Scale(2.0, 0.5)],
        6 => vec![Lean(0.25, 0.0), Rotate(-90.0)],
        7 => vec![FlipX, FlipY, Scale(0.5, 1.0)],
        8 => vec![
            Scale(2.0, 0.5),
            Rotate(-45.0),
            FlipY,
            Move(DVec2::new(-40.0, 45.0)),
        ],
        9 => vec![
            Lean(0.0, 0.25),
            Rotate(-180.0),
            Move(DVec2::new(-200.0, 0.0)),
            FlipY,
        ],
        _ => return None,
    };
    Some(steps)
}

/// A blue pentagon on yellow; digit keys replace it with a transformed copy.
#[derive(Debug, Clone)]
pub struct PolygonProgram {
    center: DVec2,
    initial: Vec<DVec2>,
    points: Vec<DVec2>,
}

impl PolygonProgram {
    pub fn new() -> Self {
        Self::with_center(DVec2::new(300.0, 300.0))
    }

    pub fn with_center(center: DVec2) -> Self {
        let mut initial = regular_polygon(center, RADIUS, 5);
        PolygonTransform::Rotate(INITIAL_ROTATION).apply(&mut initial, center);
        Self {
            center,
            points: initial.clone(),
            initial,
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Resets the polygon and runs preset `digit`. Returns false for unbound digits.
    pub fn apply_preset(&mut self, digit: u8) -> bool {
        let Some(steps) = preset(digit) else {
            return false;
        };
        self.points.clone_from(&self.initial);
        for step in &steps {
            step.apply(&mut self.points, self.center);
        }
        tracing::debug!(target: "engine", digit, steps = steps.len(), "polygon preset applied");
        true
    }
}

impl Default for PolygonProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl Animated for PolygonProgram {
    fn update_frame(&mut self, _frame_number: u64) {}

    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult {
        surface.fill_background(Color::YELLOW);
        surface.set_fill_style(Color::BLUE);
        surface.fill_poly(&self.points);
        Ok(())
    }
}

impl Program for PolygonProgram {
    fn name(&self) -> &str {
        "polygon"
    }

    fn handle_input(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> SceneResult<bool> {
        match *event {
            InputEvent::Key(Key::Digit(digit)) if self.apply_preset(digit) => {
                self.draw(surface)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn assert_points_eq(actual: &[DVec2], expected: &[DVec2]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff_eq(*e, 1e-9), "{a} != {e}");
        }
    }

    #[test]
    fn initial_pentagon_is_rotated_about_the_centre() {
        let program = PolygonProgram::new();
        let first = program.points()[0];
        let expected = DVec2::new(300.0, 300.0) + DVec2::from_angle(54f64.to_radians()) * RADIUS;
        assert!(first.abs_diff_eq(expected, 1e-9));
    }

    #[test]
    fn presets_always_start_from_the_initial_polygon() {
        let mut program = PolygonProgram::new();
        program.apply_preset(2);
        program.apply_preset(2);

        let mut expected = PolygonProgram::new().initial;
        PolygonTransform::Rotate(24.0).apply(&mut expected, program.center);
        assert_points_eq(program.points(), &expected);
    }

    #[test]
    fn preset_five_moves_before_scaling_about_the_centre() {
        let mut program = PolygonProgram::new();
        program.apply_preset(5);

        let expected: Vec<DVec2> = PolygonProgram::new()
            .initial
            .iter()
            .map(|p| {
                let moved = *p + DVec2::new(0.0, -444.0) - program.center;
                program.center + moved * DVec2::new(2.0, 0.5)
            })
            .collect();
        assert_points_eq(program.points(), &expected);
    }

    #[test]
    fn unbound_keys_leave_the_canvas_alone() {
        let mut program = PolygonProgram::new();
        let mut surface = RecordingSurface::new(600, 600);
        let repaint = program
            .handle_input(&InputEvent::Key(Key::Digit(0)), &mut surface)
            .unwrap();
        assert!(!repaint);
        assert!(surface.ops().is_empty());

        let repaint = program
            .handle_input(&InputEvent::Key(Key::Digit(7)), &mut surface)
            .unwrap();
        assert!(repaint);
        assert_eq!(surface.paints().last().map(|p| p.color), Some(Color::BLUE));
    }
}
