use std::cell::Cell;

use glam::{DAffine2, DVec2};

use super::{NodeRef, NodeStyle, SceneNode};
use crate::error::SceneResult;
use crate::surface::{Color, Surface};

/// Wraps one child with a modeling transform.
///
/// Points of the child are scaled first, then rotated about the origin, then
/// translated. The setters take `&self` so a node that is already shared can
/// still be animated.
pub struct TransformNode {
    style: NodeStyle,
    child: NodeRef,
    rotation_degrees: Cell<f64>,
    scale: Cell<DVec2>,
    translation: Cell<DVec2>,
}

impl TransformNode {
    pub fn new(child: NodeRef) -> Self {
        Self {
            style: NodeStyle::default(),
            child,
            rotation_degrees: Cell::new(0.0),
            scale: Cell::new(DVec2::ONE),
            translation: Cell::new(DVec2::ZERO),
        }
    }

    pub fn child(&self) -> &NodeRef {
        &self.child
    }

    pub fn set_scale(&self, sx: f64, sy: f64) -> &Self {
        self.scale.set(DVec2::new(sx, sy));
        self
    }

    pub fn set_translation(&self, dx: f64, dy: f64) -> &Self {
        self.translation.set(DVec2::new(dx, dy));
        self
    }

    /// Rotation about the origin, in degrees.
    pub fn set_rotation_degrees(&self, degrees: f64) {
        self.rotation_degrees.set(degrees);
    }

    /// Shorthand for `style().set_color(..)` that keeps the transform chain going.
    pub fn set_color(&self, color: Option<Color>) -> &Self {
        self.style.set_color(color);
        self
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees.get()
    }

    pub fn scale(&self) -> DVec2 {
        self.scale.get()
    }

    pub fn translation(&self) -> DVec2 {
        self.translation.get()
    }

    /// `Translate · Rotate · Scale`, the matrix the child is drawn under relative
    /// to this node's parent space.
    pub fn matrix(&self) -> DAffine2 {
        DAffine2::from_scale_angle_translation(
            self.scale(),
            self.rotation_degrees().to_radians(),
            self.translation(),
        )
    }
}

impl SceneNode for TransformNode {
    fn style(&self) -> &NodeStyle {
        &self.style
    }

    fn label(&self) -> &str {
        "transform"
    }

    fn render_self(&self, surface: &mut dyn Surface) -> SceneResult {
        let translation = self.translation();
        let scale = self.scale();

        surface.save();
        surface.translate(translation.x, translation.y);
        surface.rotate(self.rotation_degrees().to_radians());
        surface.scale(scale.x, scale.y);
        let result = self.child.draw(surface);
        surface.restore();
        result
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::scene::{Shape, ShapeNode};
    use crate::surface::{RecordingSurface, SurfaceOp};

    #[test]
    fn applies_translate_rotate_scale_in_that_call_order() {
        let node = TransformNode::new(Rc::new(ShapeNode::new(Shape::Line)));
        node.set_translation(3.0, -2.0).set_scale(2.0, 0.5);
        node.set_rotation_degrees(90.0);

        let mut surface = RecordingSurface::new(10, 10);
        node.draw(&mut surface).unwrap();

        let calls: Vec<&SurfaceOp> = surface
            .ops()
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    SurfaceOp::Translate(..) | SurfaceOp::Rotate(_) | SurfaceOp::Scale(..)
                )
            })
            .collect();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], &SurfaceOp::Translate(3.0, -2.0));
        let quarter_turn = std::f64::consts::FRAC_PI_2;
        assert!(
            matches!(calls[1], SurfaceOp::Rotate(angle) if (angle - quarter_turn).abs() < 1e-12)
        );
        assert_eq!(calls[2], &SurfaceOp::Scale(2.0, 0.5));
    }

    #[test]
    fn identity_parameters_are_still_applied() {
        let node = TransformNode::new(Rc::new(ShapeNode::new(Shape::Circle)));
        let mut surface = RecordingSurface::new(10, 10);
        node.draw(&mut surface).unwrap();
        assert!(surface.ops().contains(&SurfaceOp::Rotate(0.0)));
        assert!(surface.ops().contains(&SurfaceOp::Scale(1.0, 1.0)));
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn matrix_maps_points_scale_then_rotate_then_translate() {
        let node = TransformNode::new(Rc::new(ShapeNode::new(Shape::Circle)));
        node.set_scale(2.0, 1.0).set_translation(10.0, 0.0);
        node.set_rotation_degrees(90.0);
        let p = node.matrix().transform_point2(DVec2::new(1.0, 0.0));
        assert!(p.abs_diff_eq(DVec2::new(10.0, 2.0), 1e-12));
    }
}
