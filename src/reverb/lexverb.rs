//! Lexverb - two 5-stage Schroeder allpass cascades, cross-coupled by a
//! pair of plain delay lines, with a shared one-pole damping tail.
//!
//! The cross-coupling is read-only on the *previous* sample's
//! `last_output` (spec §5 ordering rule): both taps are snapshotted at the
//! top of the per-sample tick, before either chain advances, so the left
//! chain can never observe this sample's not-yet-computed right-chain
//! output or vice versa.

use crate::dsp::{AllpassFilter, AllpassMode, DelayLine, OnePole};
use crate::error::{ReverbError, ReverbResult};
use crate::reverb::{wet1_wet2, ParamMask, ReverbModel, ReverbParams};

const LEX_TRIM: f32 = 0.7;

/// (length in ms, feedback/cross coefficient) per cascade stage.
const STAGE_TABLE: [(f32, f32); 12] = [
    (50.00, 0.750), // AP0
    (44.50, 0.720), // AP1
    (37.37, 0.691), // AP2
    (24.85, 0.649), // AP3
    (19.31, 0.662), // AP4
    (49.60, 0.750), // AP5
    (45.13, 0.720), // AP6
    (35.25, 0.691), // AP7
    (28.17, 0.649), // AP8
    (15.59, 0.646), // AP9
    (8.71, 0.646),  // dl0
    (12.05, 0.666), // dl1
];

fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate / 1000.0).round() as isize).max(1) as usize
}

pub struct LexverbModel {
    ap: [AllpassFilter; 10],
    dl0: DelayLine,
    dl1: DelayLine,
    damp_l: OnePole,
    damp_r: OnePole,
    params: ReverbParams,
    wet1: f32,
    wet2: f32,
}

impl LexverbModel {
    pub fn new(sample_rate: f32) -> Self {
        let lens: Vec<usize> = STAGE_TABLE
            .iter()
            .map(|&(ms, _)| ms_to_samples(ms, sample_rate))
            .collect();

        let ap = std::array::from_fn(|i| {
            AllpassFilter::new(lens[i], STAGE_TABLE[i].1, AllpassMode::Schroeder)
        });

        let mut dl0 = DelayLine::new(lens[10]);
        dl0.coefficient = STAGE_TABLE[10].1;
        let mut dl1 = DelayLine::new(lens[11]);
        dl1.coefficient = STAGE_TABLE[11].1;

        let mut model = Self {
            ap,
            dl0,
            dl1,
            damp_l: OnePole::new(1.0),
            damp_r: OnePole::new(1.0),
            params: ReverbParams::default(),
            wet1: 0.0,
            wet2: 0.0,
        };
        model.recompute(ParamMask::SET_ALL, &ReverbParams::default());
        model
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

        self.damp_l.set_b0(1.0 - params.damping);
        self.damp_r.set_b0(1.0 - params.damping);

        let roomscale = 0.5 + 0.5 * params.roomsize;
        let width_norm = params.width / 100.0;
        let wet = params.level * roomscale / (1.0 + width_norm * 0.2);
        let (wet1, wet2) = wet1_wet2(wet, params.width);
        self.wet1 = wet1;
        self.wet2 = wet2;
    }

    #[inline]
    fn tick(&mut self, dry: f32) -> (f32, f32) {
        let prev_ap9_last = self.ap[9].last_output();
        let prev_ap4_last = self.ap[4].last_output();

        let mut l = self.ap[0].process(dry * LEX_TRIM);
        l = self.ap[1].process(l);
        let cross_into_l = self.dl1.process(prev_ap9_last) * self.dl1.coefficient;
        l = self.ap[2].process(l + cross_into_l);
        l = self.ap[3].process(l);
        l = self.ap[4].process(l);

        let mut r = self.ap[5].process(dry * LEX_TRIM);
        r = self.ap[6].process(r);
        let cross_into_r = self.dl0.process(prev_ap4_last) * self.dl0.coefficient;
        r = self.ap[7].process(r + cross_into_r);
        r = self.ap[8].process(r);
        r = self.ap[9].process(r);

        let l_damped = self.damp_l.process(l);
        let r_damped = self.damp_r.process(r);

        let mix_l = l_damped * self.wet1 + r_damped * self.wet2;
        let mix_r = r_damped * self.wet1 + l_damped * self.wet2;
        (mix_l, mix_r)
    }
}

impl ReverbModel for LexverbModel {
    fn process_mix(&mut self, input: &[f32], left_out: &mut [f32], right_out: &mut [f32]) {
        debug_assert_eq!(input.len(), left_out.len());
        debug_assert_eq!(input.len(), right_out.len());
        if input.len() != left_out.len() || input.len() != right_out.len() {
            log::warn!("lexverb: mismatched buffer lengths passed to process_mix, ignoring call");
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
            log::warn!("lexverb: mismatched buffer lengths passed to process_replace, ignoring call");
            return;
        }
        for i in 0..input.len() {
            let (l, r) = self.tick(input[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    fn reset(&mut self) {
        for ap in &mut self.ap {
            ap.reset();
        }
        self.dl0.reset();
        self.dl1.reset();
        self.damp_l.reset();
        self.damp_r.reset();
    }

    fn set_params(&mut self, mask: ParamMask, params: &ReverbParams) {
        self.recompute(mask, params);
    }

    fn samplerate_change(&mut self, _sample_rate: f32) -> ReverbResult<()> {
        log::warn!("lexverb: sample-rate change is not supported");
        Err(ReverbError::UnsupportedSampleRateChange)
    }

    fn params(&self) -> ReverbParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_after_reset_is_exact() {
        let mut model = LexverbModel::new(48_000.0);
        model.reset();
        let input = [0.0_f32; 64];
        let mut left = [0.0_f32; 64];
        let mut right = [0.0_f32; 64];
        model.process_replace(&input, &mut left, &mut right);
        assert_eq!(left, [0.0; 64]);
        assert_eq!(right, [0.0; 64]);
    }

    #[test]
    fn impulse_produces_a_bounded_nonzero_tail() {
        // S2: impulse then 4095 zeros; tail energy present, no runaway.
        let mut model = LexverbModel::new(48_000.0);
        let mut input = vec![0.0_f32; 4096];
        input[0] = 1.0;
        let mut left = vec![0.0_f32; 4096];
        let mut right = vec![0.0_f32; 4096];
        model.process_replace(&input, &mut left, &mut right);

        let energy: f32 = left.iter().chain(right.iter()).map(|x| x * x).sum();
        assert!(energy > 0.001, "expected an audible tail, got energy {energy}");
        for &s in left.iter().chain(right.iter()) {
            assert!(s.abs() < 10.0, "output should not run away, got {s}");
        }
    }

    #[test]
    fn samplerate_change_is_unsupported() {
        let mut model = LexverbModel::new(48_000.0);
        assert!(model.samplerate_change(44_100.0).is_err());
    }

    #[test]
    fn determinism_from_reset() {
        let mut model = LexverbModel::new(44_100.0);
        let input: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.013).sin() * 0.3).collect();

        model.reset();
        let mut l1 = vec![0.0; 1024];
        let mut r1 = vec![0.0; 1024];
        model.process_replace(&input, &mut l1, &mut r1);

        model.reset();
        let mut l2 = vec![0.0; 1024];
        let mut r2 = vec![0.0; 1024];
        model.process_replace(&input, &mut l2, &mut r2);

        assert_eq!(l1, l2);
        assert_eq!(r1, r2);
    }
}
