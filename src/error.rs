//! Error taxonomy for the reverb engine's public contract.
//!
//! The audio thread never unwinds: every public entry point returns a
//! sentinel `Result` instead of panicking, and misuse that can't be
//! reported through the return type (e.g. a caller passing a buffer of
//! the wrong length to `process_mix`) is logged via [`log`] and treated
//! as a no-op rather than propagated as a panic.

/// Errors that can cross the reverb engine's public boundary.
#[derive(Debug, thiserror::Error)]
pub enum ReverbError {
    /// [`crate::new_revmodel`] was asked to construct a model at a
    /// non-positive sample rate.
    #[error("invalid sample rate: {0} (must be > 0)")]
    InvalidSampleRate(f32),

    /// A buffer required by construction could not be sized/allocated.
    /// No partially-initialized model is ever returned when this occurs.
    #[error("buffer allocation failed while constructing the reverb model")]
    AllocationFailed,

    /// The selected model does not support reconfiguring its sample rate
    /// after construction (Lexverb, per design).
    #[error("sample-rate change is not supported by this reverb model")]
    UnsupportedSampleRateChange,
}

/// Result alias used throughout the reverb engine's public API.
pub type ReverbResult<T> = Result<T, ReverbError>;
