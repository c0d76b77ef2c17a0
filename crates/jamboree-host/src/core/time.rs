/// Most fixed steps honored per frame; keeps one long frame from
/// snowballing into a catch-up stall.
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Fixed-step accumulator.
/// Translates variable frame deltas into whole simulation steps so the
/// simulation advances at a constant rate regardless of frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Feed one frame's delta; returns how many fixed steps are due.
    pub fn steps(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        let cap = self.dt * MAX_STEPS_PER_FRAME as f32;
        if self.accumulator > cap {
            self.accumulator = cap;
        }
        let due = (self.accumulator / self.dt) as u32;
        self.accumulator -= due as f32 * self.dt;
        due
    }

    /// Fraction of a step accumulated toward the next tick (0.0 to 1.0),
    /// for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Drop any accumulated time, e.g. after a pause.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_frame_yields_one_step() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.steps(1.0 / 60.0), 1);
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.steps(0.008), 0);
        assert_eq!(ts.steps(0.010), 1);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.steps(1.0), MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn reset_drops_accumulated_time() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.steps(0.01);
        ts.reset();
        assert_eq!(ts.steps(0.01), 0);
    }

    #[test]
    fn alpha_stays_in_unit_range() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.steps(0.008);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {a}");
    }
}
