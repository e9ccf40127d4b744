//! Fixed timestep clock
//!
//! Converts variable frame times into a whole number of fixed simulation
//! steps. A time scale of 0 pauses the simulation: no steps are produced,
//! so nothing that depends on elapsed time advances.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Largest frame time accepted before clamping (avoids huge catch-up bursts)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    time_scale: f32,
    accumulator: f32,
    now: f32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: if step > 0.0 { step } else { SIM_DT },
            time_scale: 1.0,
            accumulator: 0.0,
            now: 0.0,
        }
    }

    /// Seconds per simulation step
    pub fn delta_time(&self) -> f32 {
        self.step
    }

    /// Simulated seconds elapsed so far
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// 1.0 is real time, 0.0 pauses
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Feed one frame's wall time; returns how many fixed steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT) * self.time_scale;
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            self.now += self.step;
            substeps += 1;
        }
        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}
