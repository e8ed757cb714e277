//! Game loop module - fixed-step gravity driven by frame timestamps
//!
//! The host calls [`FixedStepLoop::frame`] once per rendered frame with a
//! monotonic timestamp. Elapsed time is accumulated and consumed in whole
//! drop intervals, so the simulation rate does not depend on the frame rate.
//!
//! - Frames further apart than [`MAX_FRAME_DELTA_MS`] are treated as a stall
//!   and skipped.
//! - Constrained hosts cap each frame at [`NOMINAL_FRAME_MS`].
//! - During a slow-motion window elapsed time is scaled before accumulation.
//! - While the session is not playing the baseline keeps moving but nothing
//!   accumulates.

use crate::game_state::GameSession;
use crate::types::{MAX_FRAME_DELTA_MS, NOMINAL_FRAME_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopConfig {
    /// Cap each frame's delta at the nominal frame duration.
    pub constrained: bool,
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Gravity steps performed.
    pub steps: u32,
    /// The frame was discarded as a stall.
    pub skipped: bool,
}

#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    config: LoopConfig,
    last_frame_ms: Option<f64>,
    accumulator_ms: f64,
    /// Unscaled time spent playing; slow-motion windows are measured on it.
    clock_ms: f64,
    slow_motion_until_ms: f64,
    slow_motion_factor: f64,
}

impl FixedStepLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            last_frame_ms: None,
            accumulator_ms: 0.0,
            clock_ms: 0.0,
            slow_motion_until_ms: 0.0,
            slow_motion_factor: 1.0,
        }
    }

    pub fn config(&self) -> LoopConfig {
        self.config
    }

    /// Forget the baseline and any accumulated time.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Current time multiplier (1.0 outside slow motion).
    pub fn time_multiplier(&self) -> f64 {
        if self.clock_ms < self.slow_motion_until_ms {
            self.slow_motion_factor
        } else {
            1.0
        }
    }

    /// Open a slow-motion window starting now.
    pub fn start_slow_motion(&mut self, duration_ms: u32, factor: f64) {
        self.slow_motion_until_ms = self.clock_ms + duration_ms as f64;
        self.slow_motion_factor = factor;
    }

    /// Advance the session to `now_ms`.
    pub fn frame(&mut self, now_ms: f64, session: &mut GameSession) -> FrameOutcome {
        let Some(last) = self.last_frame_ms.replace(now_ms) else {
            return FrameOutcome::default();
        };
        if !session.is_playing() {
            return FrameOutcome::default();
        }

        let mut delta = (now_ms - last).max(0.0);
        if delta > MAX_FRAME_DELTA_MS {
            log::debug!("skipping stalled frame ({delta:.1}ms)");
            return FrameOutcome {
                steps: 0,
                skipped: true,
            };
        }
        if self.config.constrained {
            delta = delta.min(NOMINAL_FRAME_MS);
        }

        self.clock_ms += delta;
        self.accumulator_ms += delta * self.time_multiplier();

        let mut steps = 0;
        loop {
            let interval = session.current_drop_interval() as f64;
            if self.accumulator_ms < interval || !session.is_playing() {
                break;
            }
            session.gravity_step();
            self.accumulator_ms -= interval;
            steps += 1;
        }

        if let Some(request) = session.take_slow_motion_request() {
            self.start_slow_motion(request.duration_ms, request.factor);
        }

        FrameOutcome {
            steps,
            skipped: false,
        }
    }
}

impl Default for FixedStepLoop {
    fn default() -> Self {
        Self::new(LoopConfig::default())
    }
}
