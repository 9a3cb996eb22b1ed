use glam::{DAffine2, DVec2};

use super::state::StateStack;
use super::{Color, Surface};

/// The paint in effect when a fill or stroke was issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub transform: DAffine2,
    pub color: Color,
    pub line_width: f64,
}

/// One call made against a [`RecordingSurface`]. Path points are kept in user space.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    SetFillStyle(Color),
    SetStrokeStyle(Color),
    SetLineWidth(f64),
    BeginPath,
    MoveTo(DVec2),
    LineTo(DVec2),
    BezierCurveTo(DVec2, DVec2, DVec2),
    Arc {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    },
    ClosePath,
    Fill(Paint),
    Stroke(Paint),
    FillRect { origin: DVec2, size: DVec2, paint: Paint },
    StrokeRect { origin: DVec2, size: DVec2, paint: Paint },
    ClearRect { origin: DVec2, size: DVec2, transform: DAffine2 },
}

/// A surface without pixels that logs every call, for inspecting what a drawing does.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: StateStack,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: StateStack::default(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of states currently saved.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Every fill and stroke recorded so far, in order.
    pub fn paints(&self) -> impl Iterator<Item = &Paint> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Fill(paint)
            | SurfaceOp::Stroke(paint)
            | SurfaceOp::FillRect { paint, .. }
            | SurfaceOp::StrokeRect { paint, .. } => Some(paint),
            _ => None,
        })
    }

    fn fill_paint(&self) -> Paint {
        let state = self.state.current();
        Paint {
            transform: state.transform,
            color: state.fill,
            line_width: state.line_width,
        }
    }

    fn stroke_paint(&self) -> Paint {
        let state = self.state.current();
        Paint {
            transform: state.transform,
            color: state.stroke,
            line_width: state.line_width,
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.state.save();
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.ops.push(SurfaceOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate(dx, dy);
        self.ops.push(SurfaceOp::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.state.rotate(radians);
        self.ops.push(SurfaceOp::Rotate(radians));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
        self.ops.push(SurfaceOp::Scale(sx, sy));
    }

    fn transform(&self) -> DAffine2 {
        self.state.current().transform
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.set_fill(color);
        self.ops.push(SurfaceOp::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.set_stroke(color);
        self.ops.push(SurfaceOp::SetStrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f64) {
        if self.state.set_line_width(width) {
            self.ops.push(SurfaceOp::SetLineWidth(width));
        }
    }

    fn fill_style(&self) -> Color {
        self.state.current().fill
    }

    fn stroke_style(&self) -> Color {
        self.state.current().stroke
    }

    fn line_width(&self) -> f64 {
        self.state.current().line_width
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::MoveTo(DVec2::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::LineTo(DVec2::new(x, y)));
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ops.push(SurfaceOp::BezierCurveTo(
            DVec2::new(cp1x, cp1y),
            DVec2::new(cp2x, cp2y),
            DVec2::new(x, y),
        ));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        self.ops.push(SurfaceOp::Arc {
            center: DVec2::new(x, y),
            radius,
            start,
            end,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn fill(&mut self) {
        let paint = self.fill_paint();
        self.ops.push(SurfaceOp::Fill(paint));
    }

    fn stroke(&mut self) {
        let paint = self.stroke_paint();
        self.ops.push(SurfaceOp::Stroke(paint));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let paint = self.fill_paint();
        self.ops.push(SurfaceOp::FillRect {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
            paint,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let paint = self.stroke_paint();
        self.ops.push(SurfaceOp::StrokeRect {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
            paint,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(SurfaceOp::ClearRect {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
            transform: self.state.current().transform,
        });
    }

    fn get_rgb(&self, _x: u32, _y: u32) -> Option<[u8; 4]> {
        None
    }
}
