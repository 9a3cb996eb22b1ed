use std::f64::consts::TAU;

use glam::{DAffine2, DVec2};

/// Largest distance, in device pixels, between a curve and its flattened polyline.
const FLATTEN_TOLERANCE: f64 = 0.2;
const MAX_CURVE_SEGMENTS: usize = 512;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Subpath {
    pub points: Vec<DVec2>,
    pub closed: bool,
}

/// The current path, already flattened into device-space polylines.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlatPath {
    subpaths: Vec<Subpath>,
}

impl FlatPath {
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn current_point(&self) -> Option<DVec2> {
        self.subpaths.last().and_then(|sub| sub.points.last().copied())
    }

    pub fn move_to(&mut self, point: DVec2) {
        self.subpaths.push(Subpath {
            points: vec![point],
            closed: false,
        });
    }

    pub fn line_to(&mut self, point: DVec2) {
        let restart = match self.subpaths.last_mut() {
            Some(sub) if !sub.closed => {
                sub.points.push(point);
                return;
            }
            // A closed subpath leaves the pen at its first point.
            Some(sub) => Some(sub.points[0]),
            None => None,
        };
        match restart {
            Some(start) => self.subpaths.push(Subpath {
                points: vec![start, point],
                closed: false,
            }),
            None => self.move_to(point),
        }
    }

    pub fn close(&mut self) {
        if let Some(sub) = self.subpaths.last_mut() {
            if !sub.points.is_empty() {
                sub.closed = true;
            }
        }
    }

    /// Cubic bezier from the current point; all control points are in device space.
    pub fn cubic_to(&mut self, c1: DVec2, c2: DVec2, to: DVec2) {
        let Some(from) = self.current_point() else {
            self.move_to(c1);
            return self.cubic_to(c1, c2, to);
        };
        let hull = from.distance(c1) + c1.distance(c2) + c2.distance(to);
        let segments = ((hull / 4.0).ceil() as usize).clamp(1, MAX_CURVE_SEGMENTS);
        for step in 1..=segments {
            let t = step as f64 / segments as f64;
            let mt = 1.0 - t;
            let point = from * (mt * mt * mt)
                + c1 * (3.0 * mt * mt * t)
                + c2 * (3.0 * mt * t * t)
                + to * (t * t * t);
            self.line_to(point);
        }
    }

    /// Circular arc in user space, mapped through `transform`.
    pub fn arc(
        &mut self,
        transform: DAffine2,
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    ) {
        if !(radius.is_finite() && radius >= 0.0) {
            return;
        }
        let sweep = arc_sweep(start, end, anticlockwise);
        let device_radius = radius * transform.matrix2.determinant().abs().sqrt();
        let segments = arc_segments(sweep, device_radius);

        let at = |angle: f64| {
            transform.transform_point2(center + DVec2::new(angle.cos(), angle.sin()) * radius)
        };

        let first = at(start);
        if self.current_point().is_some() {
            self.line_to(first);
        } else {
            self.move_to(first);
        }
        for step in 1..=segments {
            let angle = start + sweep * step as f64 / segments as f64;
            self.line_to(at(angle));
        }
    }
}

/// Signed sweep of an arc: a full turn once the requested span reaches 2π in the
/// drawing direction, otherwise the span folded into [0, 2π).
pub(crate) fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        let span = start - end;
        if span >= TAU { -TAU } else { -span.rem_euclid(TAU) }
    } else {
        let span = end - start;
        if span >= TAU { TAU } else { span.rem_euclid(TAU) }
    }
}

fn arc_segments(sweep: f64, device_radius: f64) -> usize {
    if sweep == 0.0 {
        return 0;
    }
    if device_radius <= FLATTEN_TOLERANCE {
        return 4;
    }
    let step = 2.0 * (1.0 - FLATTEN_TOLERANCE / device_radius).acos();
    ((sweep.abs() / step).ceil() as usize).clamp(4, MAX_CURVE_SEGMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn sweep_follows_canvas_rules() {
        assert_eq!(arc_sweep(0.0, 2.0 * PI, false), TAU);
        assert_eq!(arc_sweep(0.0, 3.0 * PI, false), TAU);
        assert!((arc_sweep(5.5, 7.32, false) - 1.82).abs() < 1e-9);
        assert!((arc_sweep(0.0, -PI / 2.0, false) - 1.5 * PI).abs() < 1e-9);
        assert!((arc_sweep(0.0, PI / 2.0, true) + 1.5 * PI).abs() < 1e-9);
        assert_eq!(arc_sweep(1.0, 1.0, false), 0.0);
    }

    #[test]
    fn line_to_without_subpath_starts_one() {
        let mut path = FlatPath::default();
        path.line_to(DVec2::new(1.0, 2.0));
        assert_eq!(path.subpaths().len(), 1);
        assert_eq!(path.current_point(), Some(DVec2::new(1.0, 2.0)));
    }

    #[test]
    fn drawing_after_close_restarts_at_subpath_start() {
        let mut path = FlatPath::default();
        path.move_to(DVec2::ZERO);
        path.line_to(DVec2::X);
        path.line_to(DVec2::Y);
        path.close();
        path.line_to(DVec2::new(5.0, 5.0));
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.subpaths()[1].points, vec![DVec2::ZERO, DVec2::new(5.0, 5.0)]);
    }

    #[test]
    fn full_circle_arc_closes_on_itself() {
        let mut path = FlatPath::default();
        path.arc(DAffine2::IDENTITY, DVec2::new(10.0, 10.0), 5.0, 0.0, TAU, false);
        let points = &path.subpaths()[0].points;
        assert!(points.len() > 8);
        assert!(points[0].abs_diff_eq(*points.last().unwrap(), 1e-9));
        for point in points {
            assert!((point.distance(DVec2::new(10.0, 10.0)) - 5.0).abs() < 1e-9);
        }
    }
}
