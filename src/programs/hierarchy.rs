use glam::DVec2;

use super::swings::{DEGREES_PER_FRAME, WORLD};
use super::Program;
use crate::engine::animation::Animated;
use crate::error::SceneResult;
use crate::geometry::regular_polygon;
use crate::surface::{Color, Surface, SurfaceExt, Viewport};

/// One swing laid out by hand: pentagon hubs, bar width, base triangle and its color.
struct SwingLayout {
    hubs: [DVec2; 2],
    radius: f64,
    bar_width: f64,
    base: [DVec2; 3],
    color: Color,
}

/// Hubs of the reference swing, moved by `(-dx, dy)` and scaled about the origin.
fn hubs(dx: f64, dy: f64, scale: f64) -> [DVec2; 2] {
    [
        DVec2::new((1.8 - dx) * scale, (-2.0 + dy) * scale),
        DVec2::new((-0.8 - dx) * scale, (-1.0 + dy) * scale),
    ]
}

fn layouts() -> [SwingLayout; 3] {
    [
        SwingLayout {
            hubs: hubs(0.0, 0.0, 1.0),
            radius: 0.5,
            bar_width: 0.15,
            base: [
                DVec2::new(0.75, -2.9),
                DVec2::new(0.25, -2.9),
                DVec2::new(0.5, -1.5),
            ],
            color: Color::BLUE,
        },
        SwingLayout {
            hubs: hubs(4.0, 3.0, 0.75),
            radius: 0.4,
            bar_width: 0.11,
            base: [
                DVec2::new(-2.5, 0.0),
                DVec2::new(-2.9, 0.0),
                DVec2::new(-2.7, 1.15),
            ],
            color: Color::PURPLE,
        },
        SwingLayout {
            hubs: hubs(-4.0, 4.0, 0.5),
            radius: 0.25,
            bar_width: 0.11,
            base: [
                DVec2::new(2.05, 0.55),
                DVec2::new(2.35, 0.55),
                DVec2::new(2.2, 1.25),
            ],
            color: Color::GREEN,
        },
    ]
}

/// Strokes a pentagon around `center`, spun about its own centre.
fn rotating_pentagon(surface: &mut dyn Surface, center: DVec2, radius: f64, degrees: f64) {
    surface.save();
    surface.translate(center.x, center.y);
    surface.rotate(degrees.to_radians());
    surface.translate(-center.x, -center.y);
    surface.stroke_poly(&regular_polygon(center, radius, 5));
    surface.restore();
}

fn bar(surface: &mut dyn Surface, from: DVec2, to: DVec2, width: f64) {
    surface.save();
    surface.set_line_width(width);
    surface.set_stroke_style(Color::RED);
    surface.stroke_line(from.x, from.y, to.x, to.y);
    surface.restore();
}

fn filled_triangle(surface: &mut dyn Surface, corners: &[DVec2; 3], color: Color) {
    surface.save();
    surface.set_fill_style(color);
    surface.fill_poly(corners);
    surface.restore();
}

/// The swings again, drawn with nested save/transform/restore calls instead of nodes.
pub struct HierarchyProgram {
    frame_number: u64,
    viewport: Viewport,
    background: Color,
}

impl HierarchyProgram {
    pub fn new(preserve_aspect: bool) -> Self {
        Self {
            frame_number: 0,
            viewport: WORLD.with_preserve_aspect(preserve_aspect),
            background: Color::WHITE,
        }
    }

    fn draw_world(surface: &mut dyn Surface, degrees: f64) {
        for swing in layouts() {
            for hub in swing.hubs {
                rotating_pentagon(surface, hub, swing.radius, degrees);
            }
            bar(surface, swing.hubs[0], swing.hubs[1], swing.bar_width);
            filled_triangle(surface, &swing.base, swing.color);
        }
    }
}

impl Animated for HierarchyProgram {
    fn update_frame(&mut self, frame_number: u64) {
        self.frame_number = frame_number;
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult {
        let degrees = self.frame_number as f64 * DEGREES_PER_FRAME;
        self.viewport.paint_frame(surface, self.background, |surface| {
            Self::draw_world(surface, degrees);
            Ok(())
        })
    }
}

impl Program for HierarchyProgram {
    fn name(&self) -> &str {
        "hierarchy"
    }

    fn canvas_size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn animated(&self) -> bool {
        true
    }
}
