use thiserror::Error;

/// Failures that can surface while drawing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The host could not hand out a drawing surface. Reported once at startup.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A scene node was drawn without ever receiving a rendering routine.
    #[error("`{0}` has no rendering implementation")]
    UnimplementedShape(String),
}

pub type SceneResult<T = ()> = Result<T, SceneError>;
