use std::rc::Rc;

use super::Program;
use crate::engine::animation::Animated;
use crate::error::SceneResult;
use crate::scene::{CompositeNode, NodeRef, NodeStyle, SceneNode, ShapeNode, TransformNode};
use crate::surface::{Color, Surface, Viewport};

/// World limits shared by the swing programs: x in [-4, 4], y in [-3, 3], y up.
pub const WORLD: Viewport = Viewport::new(-4.0, 4.0, -3.0, 3.0);
/// Degrees of pentagon spin per frame.
pub const DEGREES_PER_FRAME: f64 = 0.75;

/// The primitives every swing shares.
#[derive(Clone)]
pub struct SwingParts {
    pub pentagon: NodeRef,
    pub line: NodeRef,
    pub triangle: NodeRef,
}

impl SwingParts {
    pub fn new() -> Self {
        Self {
            pentagon: ShapeNode::pentagon(0.5),
            line: ShapeNode::line(),
            triangle: ShapeNode::filled_triangle(),
        }
    }
}

impl Default for SwingParts {
    fn default() -> Self {
        Self::new()
    }
}

/// Two spinning pentagons joined by a red bar, on a colored base.
pub struct Swing {
    body: CompositeNode,
    left: Rc<TransformNode>,
    right: Rc<TransformNode>,
}

impl Swing {
    pub fn new(color: Color, parts: &SwingParts) -> Self {
        let left = Rc::new(TransformNode::new(parts.pentagon.clone()));
        left.set_translation(-1.3, 0.7);
        let right = Rc::new(TransformNode::new(parts.pentagon.clone()));
        right.set_translation(1.3, -0.7);

        let bar = TransformNode::new(parts.line.clone());
        bar.set_color(Some(Color::RED));
        bar.set_rotation_degrees(-30.0);

        let base = TransformNode::new(parts.triangle.clone());
        base.set_scale(0.75, 2.0)
            .set_translation(0.0, -2.0)
            .set_color(Some(color));

        let mut body = CompositeNode::new();
        body.add(left.clone())
            .add(right.clone())
            .add(Rc::new(bar))
            .add(Rc::new(base));
        Self { body, left, right }
    }

    pub fn set_pentagons_rotation(&self, degrees: f64) {
        self.left.set_rotation_degrees(degrees);
        self.right.set_rotation_degrees(degrees);
    }

    pub fn pentagons(&self) -> [&TransformNode; 2] {
        [&self.left, &self.right]
    }
}

impl SceneNode for Swing {
    fn style(&self) -> &NodeStyle {
        self.body.style()
    }

    fn label(&self) -> &str {
        "swing"
    }

    fn render_self(&self, surface: &mut dyn Surface) -> SceneResult {
        self.body.render_self(surface)
    }
}

/// Builds the three-swing world. The returned swings are the animated handles.
pub fn build_world(parts: &SwingParts) -> (CompositeNode, Vec<Rc<Swing>>) {
    let placements = [
        (Color::PURPLE, (-2.5, 1.0), 0.75),
        (Color::BLUE, (1.0, -0.5), 1.0),
        (Color::GREEN, (2.0, 2.0), 0.5),
    ];

    let mut world = CompositeNode::new();
    let mut swings = Vec::with_capacity(placements.len());
    for (color, (dx, dy), scale) in placements {
        let swing = Rc::new(Swing::new(color, parts));
        let placed = TransformNode::new(swing.clone());
        placed.set_translation(dx, dy).set_scale(scale, scale);
        world.add(Rc::new(placed));
        swings.push(swing);
    }
    (world, swings)
}

/// Three swings drawn through the scene graph, pentagons spinning while animated.
pub struct SwingsProgram {
    world: CompositeNode,
    swings: Vec<Rc<Swing>>,
    viewport: Viewport,
    background: Color,
}

impl SwingsProgram {
    pub fn new(preserve_aspect: bool) -> Self {
        let (world, swings) = build_world(&SwingParts::new());
        Self {
            world,
            swings,
            viewport: WORLD.with_preserve_aspect(preserve_aspect),
            background: Color::WHITE,
        }
    }

    pub fn swings(&self) -> &[Rc<Swing>] {
        &self.swings
    }
}

impl Animated for SwingsProgram {
    fn update_frame(&mut self, frame_number: u64) {
        let angle = frame_number as f64 * DEGREES_PER_FRAME;
        for swing in &self.swings {
            swing.set_pentagons_rotation(angle);
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult {
        let world = &self.world;
        self.viewport
            .paint_frame(surface, self.background, |surface| world.draw(surface))
    }
}

impl Program for SwingsProgram {
    fn name(&self) -> &str {
        "swings"
    }

    fn canvas_size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn animated(&self) -> bool {
        true
    }
}
