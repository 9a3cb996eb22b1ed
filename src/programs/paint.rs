use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::Program;
use crate::engine::animation::Animated;
use crate::engine::input::{InputEvent, Key, PointerButton};
use crate::error::SceneResult;
use crate::geometry::regular_polygon;
use crate::surface::{Color, Surface, SurfaceExt};

const STAMP_RADIUS: f64 = 40.0;
/// Minimum Manhattan distance in pixels between two stamps of one drag.
const MIN_STAMP_SPACING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// A fresh random color for every stamp.
    #[default]
    Random,
    Red,
    Green,
    Blue,
    Pink,
}

impl ColorChoice {
    pub fn from_digit(digit: u8) -> Option<Self> {
        Some(match digit {
            0 => ColorChoice::Random,
            1 => ColorChoice::Red,
            2 => ColorChoice::Green,
            3 => ColorChoice::Blue,
            4 => ColorChoice::Pink,
            _ => return None,
        })
    }

    fn pick(self, rng: &mut impl Rng) -> Color {
        match self {
            ColorChoice::Random => Color::random(rng),
            ColorChoice::Red => Color::RED,
            ColorChoice::Green => Color::GREEN,
            ColorChoice::Blue => Color::BLUE,
            ColorChoice::Pink => Color::PINK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeChoice {
    /// Triangle, square or pentagon, chosen per stamp.
    #[default]
    Random,
    Sides(u32),
}

impl ShapeChoice {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'a' => ShapeChoice::Random,
            't' => ShapeChoice::Sides(3),
            's' => ShapeChoice::Sides(4),
            'p' => ShapeChoice::Sides(5),
            'h' => ShapeChoice::Sides(6),
            _ => return None,
        })
    }

    fn sides(self, rng: &mut impl Rng) -> u32 {
        match self {
            // 4 comes up twice as often as 3 or 5.
            ShapeChoice::Random => (rng.gen::<f64>() * 2.0 + 3.0).round() as u32,
            ShapeChoice::Sides(sides) => sides,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    previous: DVec2,
    color: ColorChoice,
}

/// Stamps regular polygons along the pointer while the primary button is held.
#[derive(Debug)]
pub struct PaintProgram {
    rng: SmallRng,
    color_choice: ColorChoice,
    shape_choice: ShapeChoice,
    drag: Option<Drag>,
}

impl PaintProgram {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            rng,
            color_choice: ColorChoice::default(),
            shape_choice: ShapeChoice::default(),
            drag: None,
        }
    }

    pub fn color_choice(&self) -> ColorChoice {
        self.color_choice
    }

    pub fn shape_choice(&self) -> ShapeChoice {
        self.shape_choice
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn clear(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_fill_style(Color::WHITE);
        surface.fill_rect(0.0, 0.0, surface.width() as f64, surface.height() as f64);
        surface.restore();
    }

    /// Returns false when the chosen shape has fewer than three sides.
    fn stamp(&mut self, surface: &mut dyn Surface, center: DVec2, color: ColorChoice) -> bool {
        let fill = color.pick(&mut self.rng);
        let sides = self.shape_choice.sides(&mut self.rng);
        let points = regular_polygon(center, STAMP_RADIUS, sides);
        if points.len() < 3 {
            tracing::warn!(target: "paint", sides, "shape has too few sides to stamp");
            return false;
        }

        surface.set_fill_style(fill);
        surface.begin_path();
        surface.move_to(points[0].x, points[0].y);
        for i in 1..=points.len() {
            let point = points[i % points.len()];
            surface.line_to(point.x, point.y);
        }
        surface.stroke();
        surface.fill();
        surface.close_path();
        tracing::trace!(target: "paint", x = center.x, y = center.y, sides, color = %fill, "stamp");
        true
    }

    fn handle_key(&mut self, key: Key, surface: &mut dyn Surface) -> bool {
        match key {
            Key::Digit(digit) => {
                if let Some(choice) = ColorChoice::from_digit(digit) {
                    self.color_choice = choice;
                    tracing::debug!(target: "paint", ?choice, "color selected");
                }
                false
            }
            Key::Char('c') => {
                self.clear(surface);
                tracing::debug!(target: "paint", "canvas cleared");
                true
            }
            Key::Char(c) => {
                if let Some(choice) = ShapeChoice::from_char(c) {
                    self.shape_choice = choice;
                    tracing::debug!(target: "paint", ?choice, "shape selected");
                }
                false
            }
            Key::Space | Key::Escape => false,
        }
    }
}

impl Animated for PaintProgram {
    fn update_frame(&mut self, _frame_number: u64) {}

    /// Starts over with a white canvas; strokes are not retained.
    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult {
        self.clear(surface);
        Ok(())
    }
}

impl Program for PaintProgram {
    fn name(&self) -> &str {
        "paint"
    }

    fn handle_input(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> SceneResult<bool> {
        let repaint = match *event {
            InputEvent::PointerDown {
                position,
                button: PointerButton::Primary,
            } if self.drag.is_none() => {
                self.drag = Some(Drag {
                    previous: position.round(),
                    color: self.color_choice,
                });
                false
            }
            InputEvent::PointerMove { position } => match self.drag {
                Some(drag) => {
                    let position = position.round();
                    let offset = (position - drag.previous).abs();
                    if offset.x + offset.y < MIN_STAMP_SPACING {
                        false
                    } else {
                        let stamped = self.stamp(surface, position, drag.color);
                        self.drag = Some(Drag {
                            previous: position,
                            ..drag
                        });
                        stamped
                    }
                }
                None => false,
            },
            InputEvent::PointerUp { .. } => {
                self.drag = None;
                false
            }
            InputEvent::Key(key) => self.handle_key(key, surface),
            InputEvent::PointerDown { .. } => false,
        };
        Ok(repaint)
    }
}
