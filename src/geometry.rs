//! Planar polygon helpers and 3x3 homogeneous transforms.

use std::f64::consts::TAU;

use glam::{DMat3, DVec2};

/// Vertices of a regular polygon with its first vertex at angle 0.
pub fn regular_polygon(center: DVec2, radius: f64, sides: u32) -> Vec<DVec2> {
    let step = TAU / sides as f64;
    (0..sides)
        .map(|i| center + DVec2::from_angle(i as f64 * step) * radius)
        .collect()
}

/// One elementary polygon transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonTransform {
    /// Moves every vertex by the offset. Independent of the pivot.
    Move(DVec2),
    /// Rotation in degrees about the pivot.
    Rotate(f64),
    /// Mirror across the horizontal line through the pivot.
    FlipX,
    /// Mirror across the vertical line through the pivot.
    FlipY,
    Scale(f64, f64),
    /// Shear: x += kx * y, y += ky * x, relative to the pivot.
    Lean(f64, f64),
}

impl PolygonTransform {
    /// The homogeneous matrix of this transform about `pivot`.
    pub fn matrix(&self, pivot: DVec2) -> DMat3 {
        let local = match *self {
            PolygonTransform::Move(offset) => return DMat3::from_translation(offset),
            PolygonTransform::Rotate(degrees) => DMat3::from_angle(degrees.to_radians()),
            PolygonTransform::FlipX => DMat3::from_scale(DVec2::new(1.0, -1.0)),
            PolygonTransform::FlipY => DMat3::from_scale(DVec2::new(-1.0, 1.0)),
            PolygonTransform::Scale(sx, sy) => DMat3::from_scale(DVec2::new(sx, sy)),
            PolygonTransform::Lean(kx, ky) => DMat3::from_cols_array(&[
                1.0, ky, 0.0, //
                kx, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ]),
        };
        DMat3::from_translation(pivot) * local * DMat3::from_translation(-pivot)
    }

    pub fn apply(&self, points: &mut [DVec2], pivot: DVec2) {
        let matrix = self.matrix(pivot);
        for point in points.iter_mut() {
            *point = matrix.transform_point2(*point);
        }
    }
}
