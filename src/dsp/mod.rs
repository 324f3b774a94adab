// Purpose - shared ring-buffer substrate for the reverb models.
//
// Three filter kinds - delay, allpass, comb - are all built on top of the
// one `DelayLine` primitive rather than duplicating cursor arithmetic three
// times. This is what makes the Dattorro tap-read path reusable by the
// allpass and comb filters as well.

pub mod allpass;
pub mod comb;
pub mod delay;
pub mod onepole;

pub use allpass::{AllpassFilter, AllpassMode};
pub use comb::CombFilter;
pub use delay::DelayLine;
pub use onepole::OnePole;
