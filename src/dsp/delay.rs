use super::onepole::OnePole;

/*
Delay Line - Circular Buffer for Audio Delay
=============================================

A delay line is a ring buffer that stores audio samples and allows reading
from the past: y[n] = x[n - N]. It is the single substrate every filter in
this crate is built on - allpass and comb filters peek the line with
`read_tap(0)` and write their feedback-shaped value back with `process`,
rather than re-implementing cursor wrap-around themselves.

`line_in` and `line_out` coincide for single-tap usage (the common hot
path). Multi-tap algorithms (the Dattorro tank readouts) set them
independently and read extra taps with `read_tap`, which never advances
the cursor.
*/

/// A fixed-capacity ring buffer of samples with single- or multi-tap
/// read/write cursors and an optional embedded one-pole damping stage.
#[derive(Debug, Clone)]
pub struct DelayLine {
    line: Vec<f32>,
    line_out: usize,
    line_in: usize,
    damping: Option<OnePole>,
    /// Scalar cross-feed gain; used by Lexverb's cross-coupled delays.
    pub coefficient: f32,
    last_output: f32,
}

impl DelayLine {
    /// Construct a delay line of length `n` (clamped to at least 1),
    /// zero-initialized, cursors at 0.
    pub fn new(n: usize) -> Self {
        let mut line = Self {
            line: Vec::new(),
            line_out: 0,
            line_in: 0,
            damping: None,
            coefficient: 0.0,
            last_output: 0.0,
        };
        line.set_buffer(n);
        line
    }

    /// Allocate storage of length `n` (clamped to at least 1) and reset
    /// cursors and `last_output` to zero. Must only be called off the
    /// audio thread (it allocates).
    pub fn set_buffer(&mut self, n: usize) {
        let n = n.max(1);
        self.line = vec![0.0; n];
        self.line_out = 0;
        self.line_in = 0;
        self.last_output = 0.0;
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Write `v` into every cell without moving the cursors.
    pub fn fill(&mut self, v: f32) {
        self.line.fill(v);
        self.last_output = v;
    }

    /// Attach (or remove) the embedded one-pole damping stage.
    pub fn set_damping(&mut self, damping: Option<OnePole>) {
        self.damping = damping;
    }

    /// Store both cursors directly. Callers are responsible for keeping
    /// them within `[0, len())`.
    pub fn set_positions(&mut self, line_in: usize, line_out: usize) {
        self.line_in = line_in;
        self.line_out = line_out;
    }

    /// Set both cursors to the same position (single-tap usage).
    pub fn set_single_tap_position(&mut self, i: usize) {
        self.line_in = i;
        self.line_out = i;
    }

    pub fn line_out(&self) -> usize {
        self.line_out
    }

    pub fn line_in(&self) -> usize {
        self.line_in
    }

    /// Read the sample at `(line_out + k) mod N` without mutating any
    /// cursor. `k` may be negative; the modulo is Euclidean so negative
    /// offsets wrap correctly.
    pub fn read_tap(&self, k: isize) -> f32 {
        let n = self.line.len() as isize;
        let idx = (self.line_out as isize + k).rem_euclid(n);
        self.line[idx as usize]
    }

    /// Read `y = line[line_out]`, write `x` at `line[line_out]`, advance
    /// `line_out` by one modulo `N`, set `line_in = line_out`, cache and
    /// return `y`. Runs the embedded damping stage (if any) on the
    /// returned sample.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let n = self.line.len();
        let mut y = self.line[self.line_out];
        if let Some(damping) = self.damping.as_mut() {
            y = damping.process(y);
        }
        self.line[self.line_out] = x;
        self.line_out = (self.line_out + 1) % n;
        self.line_in = self.line_out;
        self.last_output = y;
        y
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    pub fn reset(&mut self) {
        self.line.fill(0.0);
        self.line_out = 0;
        self.line_in = 0;
        self.last_output = 0.0;
        if let Some(damping) = self.damping.as_mut() {
            damping.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursors_stay_in_range_and_in_sync() {
        let mut d = DelayLine::new(10);
        for i in 0..37 {
            d.process(i as f32);
            assert!(d.line_out() < d.len());
            assert_eq!(d.line_out(), d.line_in());
        }
    }

    #[test]
    fn round_trip_matches_scenario_s6() {
        // S6: write s[0..199] through a delay of length N=100; the first
        // N outputs are zero, then verbatim.
        let n = 100;
        let mut d = DelayLine::new(n);
        let samples: Vec<f32> = (0..200).map(|i| i as f32).collect();
        let mut outputs = Vec::with_capacity(200);
        for &s in &samples {
            outputs.push(d.process(s));
        }
        for out in outputs.iter().take(n) {
            assert_eq!(*out, 0.0);
        }
        for i in 0..n {
            assert_eq!(outputs[n + i], samples[i]);
        }
    }

    #[test]
    fn read_tap_is_non_mutating_and_wraps_negative_offsets() {
        let mut d = DelayLine::new(4);
        for i in 0..4 {
            d.process(i as f32);
        }
        let before = d.line_out();
        let _ = d.read_tap(-1);
        let _ = d.read_tap(5);
        assert_eq!(d.line_out(), before);
    }

    #[test]
    fn fill_sets_every_cell_without_moving_cursors() {
        let mut d = DelayLine::new(5);
        d.process(1.0);
        let pos = d.line_out();
        d.fill(7.0);
        assert_eq!(d.line_out(), pos);
        for k in 0..5 {
            assert_eq!(d.read_tap(k as isize), 7.0);
        }
    }

    #[test]
    fn is_empty_is_false_for_any_constructed_line() {
        // `new` clamps to at least 1, so a constructed line is never empty.
        let d = DelayLine::new(0);
        assert!(!d.is_empty());
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn set_positions_gives_independent_read_and_write_cursors() {
        let mut d = DelayLine::new(8);
        for i in 0..8 {
            d.process(i as f32);
        }
        // Decouple line_in from line_out and confirm read_tap follows
        // line_out alone, not line_in.
        d.set_positions(3, 5);
        assert_eq!(d.line_in(), 3);
        assert_eq!(d.line_out(), 5);
        assert_eq!(d.read_tap(0), d.read_tap(0));
        let expected = d.read_tap(0);
        d.set_positions(3, 6);
        assert_ne!(d.read_tap(0), expected, "read_tap should track line_out, not line_in");
    }

    #[test]
    fn set_single_tap_position_locks_both_cursors_together() {
        let mut d = DelayLine::new(8);
        d.set_single_tap_position(4);
        assert_eq!(d.line_in(), 4);
        assert_eq!(d.line_out(), 4);
    }

    #[test]
    fn set_damping_runs_the_embedded_one_pole_on_process() {
        let mut undamped = DelayLine::new(4);
        let mut damped = DelayLine::new(4);
        damped.set_damping(Some(OnePole::new(0.1)));

        for _ in 0..4 {
            undamped.process(1.0);
            damped.process(1.0);
        }
        let undamped_out = undamped.process(1.0);
        let damped_out = damped.process(1.0);

        assert_eq!(undamped_out, 1.0, "no damping stage: output should pass through verbatim");
        assert!(
            (damped_out - 1.0).abs() > 1e-6,
            "embedded one-pole should have shaped the output away from the raw 1.0, got {damped_out}"
        );
    }
}
