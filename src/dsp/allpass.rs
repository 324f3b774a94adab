use super::delay::DelayLine;

/*
Allpass filter
==============

Passes all frequencies with unit magnitude but shifts their phase, adding
diffusion/density without coloring the sound. Two variants are used across
the three reverb models:

- FREEVERB: Freeverb's deliberate simplification, `output = bufout - x`,
  storing the *input* shaped by feedback rather than the canonical
  Schroeder write-back value. This is preserved bit-for-bit because it is
  part of what makes Freeverb sound like Freeverb - it is not "fixed" here.
- SCHROEDER: the textbook allpass section, used by Lexverb and Dattorro.
*/

/// Selects which allpass variant `AllpassFilter::process` implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllpassMode {
    Freeverb,
    Schroeder,
}

/// An allpass filter built on a [`DelayLine`].
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    delay: DelayLine,
    mode: AllpassMode,
    feedback: f32,
    last_output: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize, feedback: f32, mode: AllpassMode) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            mode,
            feedback,
            last_output: 0.0,
        }
    }

    pub fn set_delay_len(&mut self, n: usize) {
        self.delay.set_buffer(n);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback;
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    /// Read a tap out of the underlying delay without mutating the cursor
    /// (used by Dattorro's signed tap readouts).
    pub fn read_tap(&self, k: isize) -> f32 {
        self.delay.read_tap(k)
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let bufout = self.delay.read_tap(0);
        let g = self.feedback;
        let (output, writeback) = match self.mode {
            AllpassMode::Freeverb => (bufout - x, x + bufout * g),
            AllpassMode::Schroeder => {
                let v = x + bufout * g;
                (bufout - v * g, v)
            }
        };
        let _ = self.delay.process(writeback);
        self.last_output = output;
        output
    }

    pub fn reset(&mut self) {
        self.delay.reset();
        self.last_output = 0.0;
    }

    pub fn fill(&mut self, v: f32) {
        self.delay.fill(v);
    }
}
