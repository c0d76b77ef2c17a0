/// One-shot countdown driven by fixed simulation ticks.
///
/// The timer decrements while live; the zero crossing is reported
/// exactly once, after which `tick` never decrements again.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: f32,
    done: bool,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            done: false,
        }
    }

    /// Advance by `dt` seconds. Returns true on the tick where the timer
    /// first reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.done {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.done = true;
            return true;
        }
        false
    }

    /// Seconds left. May be negative on the tick that overshot zero.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn decrements_by_elapsed_time() {
        let mut cd = Countdown::new(3.0);
        assert!(!cd.tick(0.5));
        assert!(!cd.tick(0.25));
        assert!((cd.remaining() - 2.25).abs() < EPSILON);
        assert!(!cd.is_done());
    }

    #[test]
    fn reports_zero_crossing_exactly_once() {
        let mut cd = Countdown::new(3.0);
        assert!(!cd.tick(1.0));
        assert!(!cd.tick(1.0));
        assert!(cd.tick(1.0), "third second should finish the countdown");
        assert!(cd.remaining().abs() < EPSILON);
        assert!(!cd.tick(1.0), "crossing must not fire twice");
    }

    #[test]
    fn overshoot_finishes_on_the_same_tick() {
        let mut cd = Countdown::new(3.0);
        assert!(cd.tick(5.0));
        assert!((cd.remaining() + 2.0).abs() < EPSILON);
        assert!(cd.is_done());
    }

    #[test]
    fn frozen_after_done() {
        let mut cd = Countdown::new(1.0);
        cd.tick(2.0);
        let frozen = cd.remaining();
        cd.tick(10.0);
        assert_eq!(cd.remaining(), frozen);
    }

    #[test]
    fn zero_dt_is_a_no_op_while_positive() {
        let mut cd = Countdown::new(3.0);
        assert!(!cd.tick(0.0));
        assert_eq!(cd.remaining(), 3.0);
    }
}
