use super::delay::DelayLine;

/*
Comb filter
===========

A feedback delay with a one-pole lowpass inside the feedback path. Many
combs in parallel, each with a mutually-prime delay length, create the
dense, regularly-spaced echo pattern that is the building block of
parallel-comb (Freeverb-style) reverbs.

  y[n]          = delay.read()
  filterstore   = y * damp2 + filterstore * damp1      (damp1 + damp2 = 1)
  delay.write(x + filterstore * feedback)
*/

/// A feedback comb filter with an internal one-pole damping stage in its
/// feedback path, built on a [`DelayLine`].
#[derive(Debug, Clone)]
pub struct CombFilter {
    delay: DelayLine,
    feedback: f32,
    damp1: f32,
    damp2: f32,
    filterstore: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            feedback: 0.5,
            damp1: 0.5,
            damp2: 0.5,
            filterstore: 0.0,
        }
    }

    pub fn set_delay_len(&mut self, n: usize) {
        self.delay.set_buffer(n);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback;
    }

    /// Set the damping split; `damp2` is always derived as `1 - damp1` so
    /// the invariant `damp1 + damp2 == 1` holds after every call.
    pub fn set_damp(&mut self, damp1: f32) {
        self.damp1 = damp1;
        self.damp2 = 1.0 - damp1;
    }

    pub fn damp1(&self) -> f32 {
        self.damp1
    }

    pub fn damp2(&self) -> f32 {
        self.damp2
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.delay.read_tap(0);
        self.filterstore = y * self.damp2 + self.filterstore * self.damp1;
        let _ = self.delay.process(x + self.filterstore * self.feedback);
        y
    }

    pub fn reset(&mut self) {
        self.delay.reset();
        self.filterstore = 0.0;
    }

    pub fn fill(&mut self, v: f32) {
        self.delay.fill(v);
        self.filterstore = v;
    }
}
