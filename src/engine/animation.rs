use crate::error::SceneResult;
use crate::surface::Surface;

/// The "request next frame" primitive of the host.
pub trait FrameScheduler {
    /// Asks for one callback at the next display refresh.
    fn request_frame(&mut self);
}

/// Something with animated parameters that can redraw itself from scratch.
pub trait Animated {
    /// Moves animated parameters to `frame_number`.
    fn update_frame(&mut self, frame_number: u64);
    /// Repaints the whole picture.
    fn draw(&mut self, surface: &mut dyn Surface) -> SceneResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame ran; carries the new frame number.
    Accepted(u64),
    /// The driver was stopped when the callback fired.
    Skipped,
}

/// Runs one update-and-redraw per scheduled callback while running.
///
/// The running flag is the only cancellation signal: a callback that was
/// scheduled before a stop simply finds the driver stopped and does nothing.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    state: DriverState,
    frame_number: u64,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Applies the animation toggle. Starting schedules the first frame.
    /// Returns whether the state changed.
    pub fn set_running(&mut self, should_run: bool, scheduler: &mut dyn FrameScheduler) -> bool {
        if should_run == self.is_running() {
            return false;
        }
        if should_run {
            self.state = DriverState::Running;
            scheduler.request_frame();
        } else {
            self.state = DriverState::Stopped;
        }
        tracing::info!(
            target: "engine",
            state = ?self.state,
            frame = self.frame_number,
            "animation toggled"
        );
        true
    }

    /// The frame callback. A failed draw is returned and nothing is rescheduled.
    pub fn on_frame<A>(
        &mut self,
        target: &mut A,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> SceneResult<FrameOutcome>
    where
        A: Animated + ?Sized,
    {
        if !self.is_running() {
            tracing::trace!(target: "engine", "frame callback while stopped");
            return Ok(FrameOutcome::Skipped);
        }
        self.frame_number += 1;
        target.update_frame(self.frame_number);
        target.draw(surface)?;
        scheduler.request_frame();
        tracing::trace!(target: "engine", frame = self.frame_number, "frame drawn");
        Ok(FrameOutcome::Accepted(self.frame_number))
    }
}

/// A scheduler that only counts outstanding requests; the caller fires them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Consumes one outstanding request, if any.
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[derive(Default)]
    struct Counter {
        updates: Vec<u64>,
        draws: usize,
    }

    impl Animated for Counter {
        fn update_frame(&mut self, frame_number: u64) {
            self.updates.push(frame_number);
        }

        fn draw(&mut self, _surface: &mut dyn Surface) -> SceneResult {
            self.draws += 1;
            Ok(())
        }
    }

    #[test]
    fn starting_schedules_exactly_one_frame() {
        let mut driver = AnimationDriver::new();
        let mut scheduler = ManualScheduler::new();
        assert!(driver.set_running(true, &mut scheduler));
        assert!(!driver.set_running(true, &mut scheduler));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(driver.state(), DriverState::Running);
    }

    #[test]
    fn each_accepted_frame_reschedules_itself() {
        let mut driver = AnimationDriver::new();
        let mut scheduler = ManualScheduler::new();
        let mut target = Counter::default();
        let mut surface = RecordingSurface::new(4, 4);

        driver.set_running(true, &mut scheduler);
        for expected in 1..=3 {
            assert!(scheduler.take_request());
            let outcome = driver
                .on_frame(&mut target, &mut surface, &mut scheduler)
                .unwrap();
            assert_eq!(outcome, FrameOutcome::Accepted(expected));
        }
        assert_eq!(target.updates, vec![1, 2, 3]);
        assert_eq!(target.draws, 3);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn stopped_driver_ignores_callbacks() {
        let mut driver = AnimationDriver::new();
        let mut scheduler = ManualScheduler::new();
        let mut target = Counter::default();
        let mut surface = RecordingSurface::new(4, 4);

        let outcome = driver
            .on_frame(&mut target, &mut surface, &mut scheduler)
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert_eq!(driver.frame_number(), 0);
        assert_eq!(scheduler.pending(), 0);
        assert!(target.updates.is_empty());
    }
}
