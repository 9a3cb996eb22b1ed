//! A small retained scene graph drawn onto a [`Surface`].
//!
//! Leaves are [`ShapeNode`]s, [`TransformNode`] places one child under a
//! scale → rotate → translate modeling transform, and [`CompositeNode`] draws an
//! ordered list of children back to front.

mod composite;
mod shapes;
mod transform;

use std::cell::Cell;
use std::rc::Rc;

pub use composite::CompositeNode;
pub use shapes::{Shape, ShapeNode};
pub use transform::TransformNode;

use crate::error::{SceneError, SceneResult};
use crate::surface::{Color, Surface};

/// A node shared between parents. Nodes are single-threaded and never form cycles.
pub type NodeRef = Rc<dyn SceneNode>;

/// Optional fill and stroke overrides applied while a node draws.
///
/// `None` inherits whatever the surface currently uses.
#[derive(Debug, Default)]
pub struct NodeStyle {
    fill: Cell<Option<Color>>,
    stroke: Cell<Option<Color>>,
}

impl NodeStyle {
    pub fn fill_color(&self) -> Option<Color> {
        self.fill.get()
    }

    pub fn stroke_color(&self) -> Option<Color> {
        self.stroke.get()
    }

    pub fn set_fill_color(&self, color: Option<Color>) -> &Self {
        self.fill.set(color);
        self
    }

    pub fn set_stroke_color(&self, color: Option<Color>) -> &Self {
        self.stroke.set(color);
        self
    }

    /// Sets fill and stroke together.
    pub fn set_color(&self, color: Option<Color>) -> &Self {
        self.set_fill_color(color).set_stroke_color(color)
    }
}

/// Anything that can be drawn into a surface.
pub trait SceneNode {
    fn style(&self) -> &NodeStyle;

    /// Name used in logs and errors.
    fn label(&self) -> &str {
        "scene node"
    }

    /// Draws the node itself. Called only through [`SceneNode::draw`].
    fn render_self(&self, _surface: &mut dyn Surface) -> SceneResult {
        Err(SceneError::UnimplementedShape(self.label().to_string()))
    }

    /// Draws the node with its color overrides. The surface state is restored on
    /// return, including when `render_self` fails.
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult {
        surface.save();
        if let Some(fill) = self.style().fill_color() {
            surface.set_fill_style(fill);
        }
        if let Some(stroke) = self.style().stroke_color() {
            surface.set_stroke_style(stroke);
        }
        let result = self.render_self(surface);
        surface.restore();
        if let Err(err) = &result {
            tracing::error!(target: "scene", node = self.label(), %err, "draw failed");
        }
        result
    }
}
