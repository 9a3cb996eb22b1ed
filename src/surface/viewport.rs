use serde::{Deserialize, Serialize};

use super::{Color, Surface, SurfaceExt};
use crate::error::SceneResult;

/// Maps a rectangle of world coordinates onto the whole surface.
///
/// `top` may be smaller than `bottom`, which flips the y axis so that it points up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub preserve_aspect: bool,
}

impl Viewport {
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            preserve_aspect: false,
        }
    }

    pub const fn with_preserve_aspect(mut self, preserve_aspect: bool) -> Self {
        self.preserve_aspect = preserve_aspect;
        self
    }

    /// The limits actually used for a `width`x`height` surface, widened on one axis
    /// when the aspect ratio must be kept.
    pub fn fitted(&self, width: f64, height: f64) -> Self {
        let mut fitted = *self;
        if !self.preserve_aspect {
            return fitted;
        }
        let display_aspect = (height / width).abs();
        let requested_aspect = ((self.bottom - self.top) / (self.right - self.left)).abs();
        if display_aspect > requested_aspect {
            let excess = (self.bottom - self.top) * (display_aspect / requested_aspect - 1.0);
            fitted.bottom += excess / 2.0;
            fitted.top -= excess / 2.0;
        } else if display_aspect < requested_aspect {
            let excess = (self.right - self.left) * (requested_aspect / display_aspect - 1.0);
            fitted.right += excess / 2.0;
            fitted.left -= excess / 2.0;
        }
        fitted
    }

    /// Installs the mapping on `surface` and returns the size of one pixel in world units.
    pub fn apply(&self, surface: &mut dyn Surface) -> f64 {
        let width = surface.width() as f64;
        let height = surface.height() as f64;
        let Self {
            left,
            right,
            bottom,
            top,
            ..
        } = self.fitted(width, height);

        let pixel_width = ((right - left) / width).abs();
        let pixel_height = ((bottom - top) / height).abs();
        surface.scale(width / (right - left), height / (bottom - top));
        surface.translate(-left, -top);
        pixel_width.min(pixel_height)
    }

    /// Clears to `background`, installs the mapping with a one-pixel black pen and
    /// runs `draw`. The surface state is restored afterwards whether or not `draw` fails.
    pub fn paint_frame<F>(
        &self,
        surface: &mut dyn Surface,
        background: Color,
        draw: F,
    ) -> SceneResult
    where
        F: FnOnce(&mut dyn Surface) -> SceneResult,
    {
        surface.save();
        surface.fill_background(background);
        surface.set_fill_style(Color::BLACK);
        let pixel_size = self.apply(surface);
        surface.set_line_width(pixel_size);
        let result = draw(&mut *surface);
        surface.restore();
        result
    }
}
