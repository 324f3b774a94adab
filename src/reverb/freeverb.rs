//! Freeverb - 8 parallel combs + 4 series allpasses per channel.
//!
//! Mono-in, stereo-out, with Jezar's original DC-offset denormal guard: the
//! input is biased by a tiny constant before entering the combs, which is
//! subtracted back out before mixing, so that silence never lets the comb
//! feedback loops decay all the way into denormal territory.

use crate::dsp::{AllpassFilter, AllpassMode, CombFilter};
use crate::error::ReverbResult;
use crate::reverb::{wet1_wet2, ParamMask, ReverbModel, ReverbParams};

const NUM_COMBS: usize = 8;
const NUM_ALLPASSES: usize = 4;
const STEREO_SPREAD: usize = 23;
const DC_OFFSET: f32 = 1e-8;
const FIXED_GAIN: f32 = 0.015;
const ALLPASS_FEEDBACK: f32 = 0.5;

const COMB_TUNING_L: [usize; NUM_COMBS] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNING_L: [usize; NUM_ALLPASSES] = [556, 441, 341, 225];

fn scale_len(base: usize, sample_rate: f32) -> usize {
    ((base as f32) * sample_rate / 44_100.0).round().max(1.0) as usize
}

pub struct FreeverbModel {
    combs_l: [CombFilter; NUM_COMBS],
    combs_r: [CombFilter; NUM_COMBS],
    allpasses_l: [AllpassFilter; NUM_ALLPASSES],
    allpasses_r: [AllpassFilter; NUM_ALLPASSES],
    params: ReverbParams,
    wet1: f32,
    wet2: f32,
}

impl FreeverbModel {
    pub fn new(sample_rate: f32) -> Self {
        let mut model = Self {
            combs_l: COMB_TUNING_L.map(CombFilter::new),
            combs_r: COMB_TUNING_L.map(|len| CombFilter::new(len + STEREO_SPREAD)),
            allpasses_l: ALLPASS_TUNING_L
                .map(|len| AllpassFilter::new(len, ALLPASS_FEEDBACK, AllpassMode::Freeverb)),
            allpasses_r: ALLPASS_TUNING_L
                .map(|len| AllpassFilter::new(len + STEREO_SPREAD, ALLPASS_FEEDBACK, AllpassMode::Freeverb)),
            params: ReverbParams::default(),
            wet1: 0.0,
            wet2: 0.0,
        };
        model.resize_for_samplerate(sample_rate);
        model.recompute(ParamMask::SET_ALL, &ReverbParams::default());
        model
    }

    fn resize_for_samplerate(&mut self, sample_rate: f32) {
        for (comb, &base) in self.combs_l.iter_mut().zip(COMB_TUNING_L.iter()) {
            comb.set_delay_len(scale_len(base, sample_rate));
        }
        for (comb, &base) in self.combs_r.iter_mut().zip(COMB_TUNING_L.iter()) {
            comb.set_delay_len(scale_len(base + STEREO_SPREAD, sample_rate));
        }
        for (ap, &base) in self.allpasses_l.iter_mut().zip(ALLPASS_TUNING_L.iter()) {
            ap.set_delay_len(scale_len(base, sample_rate));
        }
        for (ap, &base) in self.allpasses_r.iter_mut().zip(ALLPASS_TUNING_L.iter()) {
            ap.set_delay_len(scale_len(base + STEREO_SPREAD, sample_rate));
        }
    }

    fn recompute(&mut self, mask: ParamMask, update: &ReverbParams) {
        let mut params = self.params;
        if mask.contains(ParamMask::SET_ROOMSIZE) {
            params.roomsize = update.roomsize.clamp(0.0, 1.0);
        }
        if mask.contains(ParamMask::SET_DAMPING) {
            params.damping = update.damping.clamp(0.0, 1.0);
        }
        if mask.contains(ParamMask::SET_WIDTH) {
            params.width = update.width.clamp(0.0, 100.0);
        }
        if mask.contains(ParamMask::SET_LEVEL) {
            params.level = update.level.clamp(0.0, 1.0);
        }
        self.params = params;

        let roomsize_eff = params.roomsize * 0.28 + 0.7;
        let damp_eff = params.damping;
        for comb in self.combs_l.iter_mut().chain(self.combs_r.iter_mut()) {
            comb.set_feedback(roomsize_eff);
            comb.set_damp(damp_eff);
        }

        let width_norm = params.width / 100.0;
        let wet = (params.level * 3.0) / (1.0 + width_norm * 0.2);
        let (wet1, wet2) = wet1_wet2(wet, params.width);
        self.wet1 = wet1;
        self.wet2 = wet2;
    }

    #[inline]
    fn tick(&mut self, dry: f32) -> (f32, f32) {
        let input = (2.0 * dry + DC_OFFSET) * FIXED_GAIN;

        let mut out_l = 0.0;
        for comb in &mut self.combs_l {
            out_l += comb.process(input);
        }
        let mut out_r = 0.0;
        for comb in &mut self.combs_r {
            out_r += comb.process(input);
        }

        for ap in &mut self.allpasses_l {
            out_l = ap.process(out_l);
        }
        for ap in &mut self.allpasses_r {
            out_r = ap.process(out_r);
        }

        out_l -= DC_OFFSET;
        out_r -= DC_OFFSET;

        let mix_l = out_l * self.wet1 + out_r * self.wet2;
        let mix_r = out_r * self.wet1 + out_l * self.wet2;
        (mix_l, mix_r)
    }
}

impl ReverbModel for FreeverbModel {
    fn process_mix(&mut self, input: &[f32], left_out: &mut [f32], right_out: &mut [f32]) {
        debug_assert_eq!(input.len(), left_out.len());
        debug_assert_eq!(input.len(), right_out.len());
        if input.len() != left_out.len() || input.len() != right_out.len() {
            log::warn!("freeverb: mismatched buffer lengths passed to process_mix, ignoring call");
            return;
        }
        for i in 0..input.len() {
            let (l, r) = self.tick(input[i]);
            left_out[i] += l;
            right_out[i] += r;
        }
    }

    fn process_replace(&mut self, input: &[f32], left_out: &mut [f32], right_out: &mut [f32]) {
        debug_assert_eq!(input.len(), left_out.len());
        debug_assert_eq!(input.len(), right_out.len());
        if input.len() != left_out.len() || input.len() != right_out.len() {
            log::warn!("freeverb: mismatched buffer lengths passed to process_replace, ignoring call");
            return;
        }
        for i in 0..input.len() {
            let (l, r) = self.tick(input[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    fn reset(&mut self) {
        for comb in self.combs_l.iter_mut().chain(self.combs_r.iter_mut()) {
            comb.fill(DC_OFFSET);
        }
        for ap in self.allpasses_l.iter_mut().chain(self.allpasses_r.iter_mut()) {
            ap.fill(DC_OFFSET);
        }
    }

    fn set_params(&mut self, mask: ParamMask, params: &ReverbParams) {
        self.recompute(mask, params);
    }

    fn samplerate_change(&mut self, sample_rate: f32) -> ReverbResult<()> {
        if sample_rate <= 0.0 {
            return Err(crate::error::ReverbError::InvalidSampleRate(sample_rate));
        }
        self.resize_for_samplerate(sample_rate);
        self.reset();
        Ok(())
    }

    fn params(&self) -> ReverbParams {
        self.params
    }
}
