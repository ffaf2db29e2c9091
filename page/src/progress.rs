//! Progress bar animations.
//!
//! Neither animation reflects real work. [`SimulatedProgress`] keeps the
//! loading modal looking busy until the page navigates away, and
//! [`ProgressAnimation`] eases a results bar up to a known value.

use std::time::Duration;

use rand::Rng;

/// Ceiling of the loading bar. It never reaches 100 on its own.
pub const LOADING_CAP: f64 = 90.0;

pub const LOADING_TICK: Duration = Duration::from_millis(200);

/// Exclusive upper bound of a single loading increment.
pub const MAX_LOADING_STEP: f64 = 20.0;

pub const ANIMATION_STEPS: u32 = 50;

pub const ANIMATION_TICK: Duration = Duration::from_millis(20);

// ============================================================================
// Loading bar
// ============================================================================

/// Randomized step function that climbs towards a cap and then stops.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProgress {
    value: f64,
    cap: f64,
    running: bool,
}

impl SimulatedProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from zero towards `cap` (clamped to 0..=100).
    pub fn start(&mut self, cap: f64) {
        self.value = 0.0;
        self.cap = cap.clamp(0.0, 100.0);
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance by a random amount in `[0, MAX_LOADING_STEP)`. Stops once the cap is hit.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if !self.running {
            return self.value;
        }
        self.value += rng.gen_range(0.0..MAX_LOADING_STEP);
        if self.value > self.cap {
            self.value = self.cap;
        }
        if self.value >= self.cap {
            self.running = false;
        }
        self.value
    }
}

// ============================================================================
// Results bar
// ============================================================================

/// One rendered state of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: f64,
}

impl Frame {
    /// CSS width, e.g. `"36.5%"`.
    pub fn width(&self) -> String {
        format!("{}%", self.value)
    }

    /// Text label rounded to a whole percent, e.g. `"37%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.value.round() as i64)
    }
}

/// Linear interpolation from 0 to a target in [`ANIMATION_STEPS`] increments.
///
/// Each call to `next` is one tick; the last frame lands exactly on the target.
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl ProgressAnimation {
    pub fn new(target: f64) -> Self {
        Self {
            target,
            increment: target / ANIMATION_STEPS as f64,
            current: 0.0,
            done: false,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Iterator for ProgressAnimation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        Some(Frame {
            value: self.current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_loading_never_exceeds_cap_and_halts() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut progress = SimulatedProgress::new();
            progress.start(LOADING_CAP);

            let mut ticks = 0;
            while progress.is_running() {
                let v = progress.step(&mut rng);
                assert!(v <= LOADING_CAP);
                ticks += 1;
                assert!(ticks < 10_000, "loading bar never halted");
            }
            assert_eq!(progress.value(), LOADING_CAP);
        }
    }

    #[test]
    fn test_stopped_progress_does_not_move() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut progress = SimulatedProgress::new();
        progress.start(LOADING_CAP);
        progress.step(&mut rng);
        progress.stop();

        let before = progress.value();
        assert_eq!(progress.step(&mut rng), before);
    }

    #[test]
    fn test_animation_converges_to_target() {
        let frames: Vec<Frame> = ProgressAnimation::new(73.0).collect();

        assert!(frames.len() >= ANIMATION_STEPS as usize);
        assert!(frames.len() <= ANIMATION_STEPS as usize + 1);
        assert!(frames.iter().all(|f| f.value <= 73.0));
        assert!(frames.windows(2).all(|w| w[0].value <= w[1].value));

        let last = frames.last().unwrap();
        assert_eq!(last.width(), "73%");
        assert_eq!(last.label(), "73%");
    }

    #[test]
    fn test_zero_target_finishes_immediately() {
        let frames: Vec<Frame> = ProgressAnimation::new(0.0).collect();
        assert_eq!(frames, vec![Frame { value: 0.0 }]);
    }

    #[test]
    fn test_frame_label_rounds() {
        assert_eq!(Frame { value: 36.5 }.label(), "37%");
        assert_eq!(Frame { value: 36.4 }.label(), "36%");
        assert_eq!(Frame { value: 1.46 }.width(), "1.46%");
    }
}
