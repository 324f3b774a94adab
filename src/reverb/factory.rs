//! Construction and dispatch - the only place in the crate that knows
//! about all three concrete model types at once.

use crate::error::{ReverbError, ReverbResult};
use crate::reverb::dattorro::DattorroModel;
use crate::reverb::freeverb::FreeverbModel;
use crate::reverb::lexverb::LexverbModel;
use crate::reverb::{ReverbModel, ReverbType};

/// Construct the selected reverb algorithm.
///
/// `sample_rate_max` is accepted for interface compatibility with hosts
/// that pre-flight a maximum rate before the device is opened, but is not
/// used to pre-size buffers here: every model reallocates exactly to
/// `sample_rate` at construction (and again on `samplerate_change`, where
/// supported), and construction never happens on the audio thread.
pub fn new_revmodel(
    sample_rate_max: f32,
    sample_rate: f32,
    reverb_type: ReverbType,
) -> ReverbResult<Box<dyn ReverbModel>> {
    if sample_rate_max <= 0.0 {
        return Err(ReverbError::InvalidSampleRate(sample_rate_max));
    }
    if sample_rate <= 0.0 {
        return Err(ReverbError::InvalidSampleRate(sample_rate));
    }

    log::debug!("constructing {reverb_type:?} reverb model at {sample_rate} Hz");

    let model: Box<dyn ReverbModel> = match reverb_type {
        ReverbType::Freeverb => Box::new(FreeverbModel::new(sample_rate)),
        ReverbType::Lexverb => Box::new(LexverbModel::new(sample_rate)),
        ReverbType::Fdn => Box::new(DattorroModel::new(sample_rate)),
    };
    Ok(model)
}
