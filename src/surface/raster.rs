use std::path::Path as FsPath;

use glam::{DAffine2, DVec2};
use image::{ImageFormat, ImageResult, Rgba, RgbaImage};
use lyon::math::{Point, point};
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};

use super::path::FlatPath;
use super::state::StateStack;
use super::{Color, Surface};
use crate::error::{SceneError, SceneResult};

const TESSELLATION_TOLERANCE: f32 = 0.05;
const MITER_LIMIT: f32 = 10.0;
/// Largest canvas side, matching the widest texture common GPUs accept.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;
/// Largest pixel count a canvas may hold (256 MiB of RGBA).
const MAX_CANVAS_PIXELS: u64 = 1 << 26;

type Triangles = VertexBuffers<Point, u32>;

/// A deterministic software surface backed by an RGBA pixel buffer.
///
/// No anti-aliasing: a pixel is covered when its centre lies inside the
/// tessellated shape, and each fill or stroke is composited once.
#[derive(Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
    state: StateStack,
    path: FlatPath,
    coverage: Vec<u32>,
    covered: Vec<usize>,
    generation: u32,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Color) -> SceneResult<Self> {
        let pixel_count = u64::from(width) * u64::from(height);
        if pixel_count == 0
            || width > MAX_CANVAS_DIMENSION
            || height > MAX_CANVAS_DIMENSION
            || pixel_count > MAX_CANVAS_PIXELS
        {
            return Err(SceneError::SurfaceUnavailable(format!(
                "cannot allocate a {width}x{height} canvas"
            )));
        }
        tracing::debug!(target: "surface", width, height, %background, "raster surface created");
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(background.to_array())),
            state: StateStack::default(),
            path: FlatPath::default(),
            coverage: vec![0; pixel_count as usize],
            covered: Vec::new(),
            generation: 0,
        })
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn save_png(&self, path: impl AsRef<FsPath>) -> ImageResult<()> {
        self.pixels.save_with_format(path, ImageFormat::Png)
    }

    fn rect_path(&self, x: f64, y: f64, width: f64, height: f64) -> FlatPath {
        let mut path = FlatPath::default();
        path.move_to(self.state.map(x, y));
        path.line_to(self.state.map(x + width, y));
        path.line_to(self.state.map(x + width, y + height));
        path.line_to(self.state.map(x, y + height));
        path.close();
        path
    }

    fn fill_triangles(path: &FlatPath) -> Option<Triangles> {
        let mut builder = Path::builder();
        let mut any = false;
        for sub in path.subpaths().iter().filter(|sub| sub.points.len() >= 3) {
            builder.begin(to_point(sub.points[0]));
            for p in &sub.points[1..] {
                builder.line_to(to_point(*p));
            }
            builder.end(true);
            any = true;
        }
        if !any {
            return None;
        }

        let mut buffers = Triangles::new();
        let options = FillOptions::default()
            .with_fill_rule(FillRule::NonZero)
            .with_tolerance(TESSELLATION_TOLERANCE);
        let result = FillTessellator::new().tessellate_path(
            &builder.build(),
            &options,
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| vertex.position()),
        );
        match result {
            Ok(()) => Some(buffers),
            Err(err) => {
                tracing::warn!(target: "surface", ?err, "fill tessellation failed");
                None
            }
        }
    }

    fn stroke_triangles(path: &FlatPath, width: f64) -> Option<Triangles> {
        let mut builder = Path::builder();
        let mut any = false;
        for sub in path.subpaths().iter().filter(|sub| sub.points.len() >= 2) {
            builder.begin(to_point(sub.points[0]));
            for p in &sub.points[1..] {
                builder.line_to(to_point(*p));
            }
            builder.end(sub.closed);
            any = true;
        }
        if !any || !(width > 0.0) {
            return None;
        }

        let mut buffers = Triangles::new();
        let options = StrokeOptions::default()
            .with_line_width(width as f32)
            .with_miter_limit(MITER_LIMIT)
            .with_tolerance(TESSELLATION_TOLERANCE);
        let result = StrokeTessellator::new().tessellate_path(
            &builder.build(),
            &options,
            &mut BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex| vertex.position()),
        );
        match result {
            Ok(()) => Some(buffers),
            Err(err) => {
                tracing::warn!(target: "surface", ?err, "stroke tessellation failed");
                None
            }
        }
    }

    /// Marks every pixel whose centre falls inside one of the triangles.
    fn cover(&mut self, triangles: &Triangles) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.coverage.fill(0);
            self.generation = 1;
        }
        self.covered.clear();

        let width = self.pixels.width();
        let height = self.pixels.height();
        for tri in triangles.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|idx| {
                let p = triangles.vertices[idx as usize];
                DVec2::new(p.x as f64, p.y as f64)
            });
            let area = edge(a, b, c);
            if area == 0.0 {
                continue;
            }

            let min = a.min(b).min(c);
            let max = a.max(b).max(c);
            let x0 = min.x.floor().max(0.0) as u32;
            let y0 = min.y.floor().max(0.0) as u32;
            let x1 = (max.x.ceil().max(0.0) as u32).min(width);
            let y1 = (max.y.ceil().max(0.0) as u32).min(height);

            for y in y0..y1 {
                for x in x0..x1 {
                    let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                    let w0 = edge(b, c, p);
                    let w1 = edge(c, a, p);
                    let w2 = edge(a, b, p);
                    let inside = if area > 0.0 {
                        w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                    } else {
                        w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                    };
                    let idx = (y * width + x) as usize;
                    if inside && self.coverage[idx] != self.generation {
                        self.coverage[idx] = self.generation;
                        self.covered.push(idx);
                    }
                }
            }
        }
    }

    fn composite(&mut self, triangles: &Triangles, color: Color) {
        self.cover(triangles);
        let width = self.pixels.width() as usize;
        for &idx in &self.covered {
            let pixel = self
                .pixels
                .get_pixel_mut((idx % width) as u32, (idx / width) as u32);
            blend(pixel, color);
        }
    }

    fn clear_covered(&mut self, triangles: &Triangles) {
        self.cover(triangles);
        let width = self.pixels.width() as usize;
        for &idx in &self.covered {
            self.pixels
                .put_pixel((idx % width) as u32, (idx / width) as u32, Rgba([0, 0, 0, 0]));
        }
    }

    fn fill_flat(&mut self, path: &FlatPath, color: Color) {
        if let Some(triangles) = Self::fill_triangles(path) {
            self.composite(&triangles, color);
        }
    }

    fn stroke_flat(&mut self, path: &FlatPath, color: Color) {
        let width = self.state.current().device_line_width();
        if let Some(triangles) = Self::stroke_triangles(path, width) {
            self.composite(&triangles, color);
        }
    }
}

fn to_point(p: DVec2) -> Point {
    point(p.x as f32, p.y as f32)
}

fn edge(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Source-over compositing of a straight-alpha color.
fn blend(dst: &mut Rgba<u8>, src: Color) {
    match src.a {
        0 => {}
        255 => *dst = Rgba(src.to_array()),
        alpha => {
            let sa = alpha as f32 / 255.0;
            let da = dst[3] as f32 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let mix = |s: u8, d: u8| {
                let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
                value.round().clamp(0.0, 255.0) as u8
            };
            *dst = Rgba([
                mix(src.r, dst[0]),
                mix(src.g, dst[1]),
                mix(src.b, dst[2]),
                (out_a * 255.0).round() as u8,
            ]);
        }
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.state.rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
    }

    fn transform(&self) -> DAffine2 {
        self.state.current().transform
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.set_fill(color);
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.set_stroke(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.set_line_width(width);
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
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.state.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.state.map(x, y);
        self.path.line_to(p);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        let c1 = self.state.map(cp1x, cp1y);
        let c2 = self.state.map(cp2x, cp2y);
        let to = self.state.map(x, y);
        self.path.cubic_to(c1, c2, to);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let transform = self.state.current().transform;
        self.path
            .arc(transform, DVec2::new(x, y), radius, start, end, anticlockwise);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.fill_flat(&path, self.state.current().fill);
        self.path = path;
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.stroke_flat(&path, self.state.current().stroke);
        self.path = path;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.rect_path(x, y, width, height);
        self.fill_flat(&rect, self.state.current().fill);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.rect_path(x, y, width, height);
        self.stroke_flat(&rect, self.state.current().stroke);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.rect_path(x, y, width, height);
        if let Some(triangles) = Self::fill_triangles(&rect) {
            self.clear_covered(&triangles);
        }
    }

    fn get_rgb(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }
}
