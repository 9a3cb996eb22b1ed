use std::f64::consts::FRAC_PI_4;
use std::rc::Rc;

use easel::scene::{CompositeNode, NodeStyle, SceneNode, ShapeNode, TransformNode};
use easel::surface::{Color, RasterSurface, RecordingSurface, Surface, SurfaceOp, Viewport};
use easel::SceneResult;
use glam::{DAffine2, DVec2};

/// Leaf that records its own name as a move_to marker.
struct Marker {
    style: NodeStyle,
    id: f64,
}

impl Marker {
    fn new(id: f64) -> Rc<Self> {
        Rc::new(Self {
            style: NodeStyle::default(),
            id,
        })
    }
}

impl SceneNode for Marker {
    fn style(&self) -> &NodeStyle {
        &self.style
    }

    fn render_self(&self, surface: &mut dyn Surface) -> SceneResult {
        surface.move_to(self.id, 0.0);
        Ok(())
    }
}

fn marker_ids(surface: &RecordingSurface) -> Vec<f64> {
    surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::MoveTo(point) => Some(point.x),
            _ => None,
        })
        .collect()
}

#[test]
fn test_composite_draws_children_in_insertion_order() {
    let mut composite = CompositeNode::new();
    composite
        .add(Marker::new(3.0))
        .add(Marker::new(1.0))
        .add(Marker::new(2.0));

    let mut surface = RecordingSurface::new(10, 10);
    composite.draw(&mut surface).unwrap();

    assert_eq!(marker_ids(&surface), vec![3.0, 1.0, 2.0]);
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_transform_matrix_is_translate_rotate_scale() {
    let cases = [
        (DVec2::new(2.0, 0.5), 30.0, DVec2::new(-1.0, 4.0)),
        (DVec2::new(-1.0, 3.0), -135.0, DVec2::new(0.25, 0.0)),
        (DVec2::ONE, 0.0, DVec2::ZERO),
    ];

    for (scale, degrees, translation) in cases {
        let node = TransformNode::new(ShapeNode::filled_rect());
        node.set_scale(scale.x, scale.y)
            .set_translation(translation.x, translation.y);
        node.set_rotation_degrees(degrees);

        let mut surface = RecordingSurface::new(10, 10);
        node.draw(&mut surface).unwrap();

        let expected = DAffine2::from_translation(translation)
            * DAffine2::from_angle(degrees.to_radians())
            * DAffine2::from_scale(scale);
        let applied = surface.paints().next().unwrap().transform;
        assert!(
            applied.abs_diff_eq(expected, 1e-12),
            "{applied:?} != {expected:?}"
        );
    }
}

#[test]
fn test_draw_restores_prior_styles() {
    let node = TransformNode::new(ShapeNode::line());
    node.set_color(Some(Color::RED));

    let mut surface = RecordingSurface::new(10, 10);
    surface.set_fill_style(Color::BLUE);
    surface.set_stroke_style(Color::GREEN);
    surface.set_line_width(3.0);
    node.draw(&mut surface).unwrap();

    assert_eq!(surface.fill_style(), Color::BLUE);
    assert_eq!(surface.stroke_style(), Color::GREEN);
    assert_eq!(surface.line_width(), 3.0);
    let stroke = surface.paints().next().unwrap();
    assert_eq!(stroke.color, Color::RED);
}

#[test]
fn test_redraw_is_bit_identical() {
    let mut world = CompositeNode::new();
    let pentagon = ShapeNode::pentagon(0.5);
    for (i, color) in [Color::PURPLE, Color::BLUE, Color::GREEN].into_iter().enumerate() {
        let node = TransformNode::new(pentagon.clone());
        node.set_translation(i as f64 * 2.0 - 2.0, 0.5)
            .set_color(Some(color));
        node.set_rotation_degrees(17.0 * i as f64);
        world.add(Rc::new(node));
    }
    let viewport = Viewport::new(-4.0, 4.0, -3.0, 3.0);

    let mut surface = RasterSurface::new(160, 120, Color::WHITE).unwrap();
    viewport
        .paint_frame(&mut surface, Color::WHITE, |s| world.draw(s))
        .unwrap();
    let first = surface.pixels().clone();
    viewport
        .paint_frame(&mut surface, Color::WHITE, |s| world.draw(s))
        .unwrap();

    assert_eq!(first.as_raw(), surface.pixels().as_raw());
    assert!(first.pixels().any(|p| p.0 == Color::PURPLE.to_array()));
}

#[test]
fn test_three_pentagons_rotate_before_translating() {
    let pentagon = ShapeNode::pentagon(1.0);
    let placements = [
        (10.0, DVec2::new(1.0, 2.0)),
        (-70.0, DVec2::new(-3.0, 0.5)),
        (200.0, DVec2::new(0.0, -4.0)),
    ];

    let mut scene = CompositeNode::new();
    let mut branches = Vec::new();
    for (degrees, offset) in placements {
        let branch = Rc::new(TransformNode::new(pentagon.clone()));
        branch.set_translation(offset.x, offset.y);
        branch.set_rotation_degrees(degrees);
        scene.add(branch.clone());
        branches.push(branch);
    }

    // what an update_frame does
    for branch in &branches {
        branch.set_rotation_degrees(45.0);
    }

    let mut surface = RecordingSurface::new(10, 10);
    scene.draw(&mut surface).unwrap();

    let strokes: Vec<DAffine2> = surface.paints().map(|paint| paint.transform).collect();
    assert_eq!(strokes.len(), 3);
    for (applied, (_, offset)) in strokes.iter().zip(placements) {
        let expected = DAffine2::from_translation(offset) * DAffine2::from_angle(FRAC_PI_4);
        assert!(applied.abs_diff_eq(expected, 1e-12));
    }

    let rotations: Vec<f64> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::Rotate(radians) => Some(*radians),
            _ => None,
        })
        .collect();
    assert_eq!(rotations.len(), 3);
    assert!(rotations.iter().all(|r| (r - FRAC_PI_4).abs() < 1e-12));
}

#[test]
fn test_unimplemented_leaf_fails_but_leaves_surface_clean() {
    struct Ghost(NodeStyle);

    impl SceneNode for Ghost {
        fn style(&self) -> &NodeStyle {
            &self.0
        }
    }

    let mut composite = CompositeNode::new();
    composite.add(Rc::new(Ghost(NodeStyle::default())));
    composite.add(Marker::new(9.0));

    let mut surface = RecordingSurface::new(10, 10);
    let err = composite.draw(&mut surface).unwrap_err();

    assert!(matches!(err, easel::SceneError::UnimplementedShape(_)));
    assert_eq!(surface.save_depth(), 0);
    assert!(marker_ids(&surface).is_empty());
}
