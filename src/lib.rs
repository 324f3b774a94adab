//! Pluggable algorithmic reverb engine for a software synthesizer.
//!
//! Three independent reverb algorithms — Freeverb, Lexverb, and a Dattorro
//! plate — share one control surface (`ReverbModel`) and one set of
//! low-level DSP primitives (delay lines, allpass filters, comb filters,
//! one-pole damping filters). The engine turns a mono dry signal into a
//! stereo wet signal, block by block, on the audio thread.
//!
//! # Example
//!
//! ```
//! use reverb_engine::{FLUID_BUFSIZE, ParamMask, ReverbParams, ReverbType, new_revmodel};
//!
//! let mut model = new_revmodel(48_000.0, 48_000.0, ReverbType::Freeverb).unwrap();
//! model.set_params(
//!     ParamMask::SET_ALL,
//!     &ReverbParams { roomsize: 0.5, damping: 0.5, width: 1.0, level: 0.8 },
//! );
//!
//! let input = [0.0_f32; FLUID_BUFSIZE];
//! let mut left = [0.0_f32; FLUID_BUFSIZE];
//! let mut right = [0.0_f32; FLUID_BUFSIZE];
//! model.process_replace(&input, &mut left, &mut right);
//! ```

pub mod dsp;
pub mod error;
pub mod reverb;

pub use error::{ReverbError, ReverbResult};
pub use reverb::factory::new_revmodel;
pub use reverb::{ParamMask, ReverbModel, ReverbParams, ReverbType};

/// Block size the caller must use for every `process_mix`/`process_replace`
/// call. Fixed at compile time, matching the host's audio callback size.
pub const FLUID_BUFSIZE: usize = 64;
