//! Fixed-step tick driver
//!
//! Frame deltas from the host (animation callback, timer, or a test) are
//! accumulated and drained in `SIM_DT` steps. Rendering happens once per
//! frame, after all substeps, and only ever sees a snapshot.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Frame, Renderer};
use crate::sim::{GameSession, TickInput, tick};

/// Frame deltas above this are treated as a stall (tab switch, debugger)
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    total_ticks: u64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            total_ticks: 0,
        }
    }

    /// Feed one frame's elapsed seconds; returns how many ticks are due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Don't carry a backlog we refused to simulate
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        self.total_ticks += u64::from(substeps);
        substeps
    }

    /// Run the due ticks then render once. One-shot signals (`jump`,
    /// `confirm`) are consumed by the first substep; if no tick is due they
    /// stay pending for the next frame.
    pub fn run_frame(
        &mut self,
        frame_dt: f32,
        session: &mut GameSession,
        input: &mut TickInput,
        renderer: &mut dyn Renderer,
    ) -> u32 {
        let substeps = self.advance(frame_dt);
        for _ in 0..substeps {
            tick(session, input);
            input.jump = false;
            input.confirm = false;
        }
        renderer.render(&Frame::capture(session));
        substeps
    }

    /// Fraction of a step left in the accumulator, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::{GamePhase, seeded};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<Frame>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedStepClock::default();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert!(clock.alpha() < 0.2);
    }

    #[test]
    fn test_substeps_capped() {
        let mut clock = FixedStepClock::default();
        // Clamped to 0.1s = 6 steps, capped at 5
        assert_eq!(clock.advance(10.0), MAX_SUBSTEPS);
        assert!(clock.alpha() <= 1.0);
        assert_eq!(clock.total_ticks(), 5);
    }

    #[test]
    fn test_bad_delta_ignored() {
        let mut clock = FixedStepClock::default();
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_one_shot_input_first_substep_only() {
        let mut session = GameSession::new(Tuning::default(), seeded(5), MemoryStore::new());
        let mut clock = FixedStepClock::default();
        let mut renderer = CountingRenderer::default();
        let mut input = TickInput {
            confirm: true,
            ..Default::default()
        };

        let steps = clock.run_frame(SIM_DT * 3.0 + 1e-4, &mut session, &mut input, &mut renderer);
        assert_eq!(steps, 3);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.time_ticks, 3);
        assert!(!input.confirm);
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(renderer.frames[0].phase, GamePhase::Playing);
    }

    #[test]
    fn test_input_pending_until_tick_due() {
        let mut session = GameSession::new(Tuning::default(), seeded(5), MemoryStore::new());
        let mut clock = FixedStepClock::default();
        let mut renderer = CountingRenderer::default();
        let mut input = TickInput {
            confirm: true,
            ..Default::default()
        };

        assert_eq!(
            clock.run_frame(SIM_DT * 0.25, &mut session, &mut input, &mut renderer),
            0
        );
        assert!(input.confirm);
        assert_eq!(session.phase, GamePhase::Start);
        // Still renders on a frame with no ticks
        assert_eq!(renderer.frames.len(), 1);
    }
}
