// Canvas-style 2D drawing, a small scene graph and the classroom programs built on them.
pub mod error;
pub mod geometry;

pub mod surface {
    mod color;
    mod context;
    mod ext;
    mod path;
    mod raster;
    mod recording;
    mod state;
    mod viewport;

    pub use color::{Color, ParseColorError};
    pub use context::Surface;
    pub use ext::SurfaceExt;
    pub use raster::{MAX_CANVAS_DIMENSION, RasterSurface};
    pub use recording::{Paint, RecordingSurface, SurfaceOp};
    pub use viewport::Viewport;
}

pub mod scene;
pub mod engine;
pub mod programs;

pub use error::{SceneError, SceneResult};
