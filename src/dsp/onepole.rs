/*
One-pole lowpass
================

The damping element shared by combs, the Dattorro bandwidth filter, and the
Dattorro/Lexverb tank damping stages. Unity DC gain is maintained by the
invariant `a1 = 1 - b0`: feed it a constant and it eventually settles at
that same constant rather than drifting.

  y[n] = b0 * x[n] + a1 * y[n-1]
*/

/// A one-pole lowpass filter with the unity-DC-gain invariant `a1 = 1 - b0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePole {
    state: f32,
    b0: f32,
    a1: f32,
}

impl OnePole {
    /// Construct a filter with the given `b0` coefficient; `a1` is derived
    /// so that `b0 + a1 == 1.0`.
    pub fn new(b0: f32) -> Self {
        Self {
            state: 0.0,
            b0,
            a1: 1.0 - b0,
        }
    }

    /// Update the filter coefficient, re-deriving `a1` so the unity-DC-gain
    /// invariant always holds after this call.
    pub fn set_b0(&mut self, b0: f32) {
        self.b0 = b0;
        self.a1 = 1.0 - b0;
    }

    pub fn b0(&self) -> f32 {
        self.b0
    }

    pub fn a1(&self) -> f32 {
        self.a1
    }

    /// Process one sample, advancing the internal state.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = x * self.b0 + self.state * self.a1;
        self.state = y;
        y
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
