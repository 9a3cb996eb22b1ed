use std::rc::Rc;

use glam::DVec2;

use super::{NodeRef, NodeStyle, SceneNode};
use crate::error::SceneResult;
use crate::surface::{Surface, SurfaceExt};

/// Leaf geometry in a unit-sized frame centred on the origin.
///
/// Shapes paint with whatever fill and stroke the surface currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Horizontal segment from (-1.5, 0) to (1.5, 0), 0.2 units wide.
    Line,
    /// Filled square of side 1.
    FilledRect,
    /// Stroked square of side 1.
    Rect,
    /// Filled circle of diameter 1.
    FilledCircle,
    /// Stroked circle of diameter 1.
    Circle,
    /// Filled triangle, base from (-0.5, 0) to (0.5, 0), apex at (0, 1).
    FilledTriangle,
    /// Stroked regular pentagon with its first vertex at angle 0.
    Pentagon { radius: f64 },
    /// Arbitrary closed polygon.
    Polygon { points: Vec<DVec2>, filled: bool },
}

impl Shape {
    fn label(&self) -> &'static str {
        match self {
            Shape::Line => "line",
            Shape::FilledRect => "filled rect",
            Shape::Rect => "rect",
            Shape::FilledCircle => "filled circle",
            Shape::Circle => "circle",
            Shape::FilledTriangle => "filled triangle",
            Shape::Pentagon { .. } => "pentagon",
            Shape::Polygon { .. } => "polygon",
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Shape::Line => {
                surface.begin_path();
                surface.move_to(-1.5, 0.0);
                surface.line_to(1.5, 0.0);
                surface.set_line_width(0.2);
                surface.stroke();
            }
            Shape::FilledRect => surface.fill_rect(-0.5, -0.5, 1.0, 1.0),
            Shape::Rect => surface.stroke_rect(-0.5, -0.5, 1.0, 1.0),
            Shape::FilledCircle => surface.fill_circle(0.0, 0.0, 0.5),
            Shape::Circle => surface.stroke_circle(0.0, 0.0, 0.5),
            Shape::FilledTriangle => surface.fill_poly(&[
                DVec2::new(-0.5, 0.0),
                DVec2::new(0.5, 0.0),
                DVec2::new(0.0, 1.0),
            ]),
            Shape::Pentagon { radius } => {
                surface.stroke_poly(&crate::geometry::regular_polygon(DVec2::ZERO, *radius, 5));
            }
            Shape::Polygon { points, filled } => {
                if *filled {
                    surface.fill_poly(points);
                } else {
                    surface.stroke_poly(points);
                }
            }
        }
    }
}

/// A scene-graph leaf that draws one [`Shape`].
pub struct ShapeNode {
    style: NodeStyle,
    shape: Shape,
}

impl ShapeNode {
    pub fn new(shape: Shape) -> Self {
        Self {
            style: NodeStyle::default(),
            shape,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn line() -> NodeRef {
        Rc::new(Self::new(Shape::Line))
    }

    pub fn filled_rect() -> NodeRef {
        Rc::new(Self::new(Shape::FilledRect))
    }

    pub fn rect() -> NodeRef {
        Rc::new(Self::new(Shape::Rect))
    }

    pub fn filled_circle() -> NodeRef {
        Rc::new(Self::new(Shape::FilledCircle))
    }

    pub fn circle() -> NodeRef {
        Rc::new(Self::new(Shape::Circle))
    }

    pub fn filled_triangle() -> NodeRef {
        Rc::new(Self::new(Shape::FilledTriangle))
    }

    pub fn pentagon(radius: f64) -> NodeRef {
        Rc::new(Self::new(Shape::Pentagon { radius }))
    }

    pub fn polygon(points: Vec<DVec2>, filled: bool) -> NodeRef {
        Rc::new(Self::new(Shape::Polygon { points, filled }))
    }
}

impl SceneNode for ShapeNode {
    fn style(&self) -> &NodeStyle {
        &self.style
    }

    fn label(&self) -> &str {
        self.shape.label()
    }

    fn render_self(&self, surface: &mut dyn Surface) -> SceneResult {
        self.shape.render(surface);
        Ok(())
    }
}
