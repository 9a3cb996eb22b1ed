pub mod circle_square;
pub mod face;
pub mod hierarchy;
pub mod paint;
pub mod polygon;
pub mod swings;

use clap::ValueEnum;

use crate::engine::animation::Animated;
use crate::engine::core::EngineConfig;
use crate::engine::input::InputEvent;
use crate::error::SceneResult;
use crate::surface::Surface;

pub use circle_square::CircleSquareProgram;
pub use face::FaceProgram;
pub use hierarchy::HierarchyProgram;
pub use paint::PaintProgram;
pub use polygon::PolygonProgram;
pub use swings::SwingsProgram;

/// One classroom exercise: owns its picture and reacts to input.
pub trait Program: Animated {
    fn name(&self) -> &str;

    /// Preferred canvas size in pixels.
    fn canvas_size(&self) -> (u32, u32) {
        (600, 600)
    }

    /// Whether the animation toggle applies to this program.
    fn animated(&self) -> bool {
        false
    }

    /// Paints the first picture onto a fresh canvas.
    fn setup(&mut self, surface: &mut dyn Surface) -> SceneResult {
        self.draw(surface)
    }

    /// Returns true when the canvas changed and should be presented.
    fn handle_input(
        &mut self,
        _event: &InputEvent,
        _surface: &mut dyn Surface,
    ) -> SceneResult<bool> {
        Ok(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgramKind {
    /// Static cartoon face.
    Face,
    /// Drag to stamp polygons.
    Paint,
    /// Keys 1-9 apply polygon transform presets.
    Polygon,
    /// Circle under a square.
    CircleSquare,
    /// Scene-graph swings with spinning pentagons.
    Swings,
    /// The swings drawn with nested transform subroutines.
    Hierarchy,
}

impl ProgramKind {
    pub fn build(self, config: &EngineConfig) -> Box<dyn Program> {
        match self {
            ProgramKind::Face => Box::new(FaceProgram::new()),
            ProgramKind::Paint => Box::new(PaintProgram::new(config.seed)),
            ProgramKind::Polygon => Box::new(PolygonProgram::new()),
            ProgramKind::CircleSquare => Box::new(CircleSquareProgram::new()),
            ProgramKind::Swings => Box::new(SwingsProgram::new(config.preserve_aspect)),
            ProgramKind::Hierarchy => Box::new(HierarchyProgram::new(config.preserve_aspect)),
        }
    }
}
