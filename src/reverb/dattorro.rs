//! Dattorro plate - predelay, bandwidth limiting, four input-diffusion
//! allpasses, and two cross-coupled figure-8 tanks read out through
//! fourteen signed taps.
//!
//! Based on Jon Dattorro's 1997 "Effect Design Part 1: Reverberator and
//! Other Filters" topology. All delay-line lengths below were originally
//! specified in samples at a 29761 Hz design rate; they are carried here
//! already converted to seconds, so building them for the live sample rate
//! is a plain `round(seconds * sample_rate)`.

use crate::dsp::{AllpassFilter, AllpassMode, DelayLine, OnePole};
use crate::error::ReverbResult;
use crate::reverb::{wet1_wet2, ParamMask, ReverbModel, ReverbParams};

const TRIM: f32 = 0.6;
const PREDELAY_SECONDS: f32 = 0.004;
const BANDWIDTH_B0: f32 = 0.9999;

const INPUT_DIFFUSION_SECONDS: [f32; 4] = [0.004771, 0.003595, 0.012735, 0.009307];
const INPUT_DIFFUSION_FEEDBACK: [f32; 4] = [0.75, 0.75, 0.625, 0.625];

const TANK_AP_SECONDS: [f32; 4] = [0.022580, 0.060482, 0.030510, 0.089244];
const TANK_AP_FEEDBACK: [f32; 4] = [0.7, 0.5, 0.7, 0.5];
const TANK_DELAY_SECONDS: [f32; 4] = [0.149625, 0.124996, 0.141696, 0.106280];

const TAP_SECONDS_LEFT: [f32; 7] = [0.008938, 0.099929, 0.064279, 0.067068, 0.066866, 0.006283, 0.035819];
const TAP_SECONDS_RIGHT: [f32; 7] = [0.011861, 0.121871, 0.041262, 0.089816, 0.070932, 0.011256, 0.004066];

fn seconds_to_samples(seconds: f32, sample_rate: f32) -> usize {
    ((seconds * sample_rate).round() as isize).max(1) as usize
}

fn seconds_to_tap_offset(seconds: f32, sample_rate: f32) -> isize {
    (seconds * sample_rate).round() as isize
}

pub struct DattorroModel {
    predelay: DelayLine,
    bandwidth: OnePole,
    input_ap: [AllpassFilter; 4],
    tank_ap: [AllpassFilter; 4],
    tank_delay: [DelayLine; 4],
    damp_l: OnePole,
    damp_r: OnePole,
    tap_left: [isize; 7],
    tap_right: [isize; 7],
    decay: f32,
    wet1: f32,
    wet2: f32,
    params: ReverbParams,
}

impl DattorroModel {
    pub fn new(sample_rate: f32) -> Self {
        let mut model = Self {
            predelay: DelayLine::new(1),
            bandwidth: OnePole::new(BANDWIDTH_B0),
            input_ap: std::array::from_fn(|i| {
                AllpassFilter::new(1, INPUT_DIFFUSION_FEEDBACK[i], AllpassMode::Schroeder)
            }),
            tank_ap: std::array::from_fn(|i| {
                AllpassFilter::new(1, TANK_AP_FEEDBACK[i], AllpassMode::Schroeder)
            }),
            tank_delay: std::array::from_fn(|_| DelayLine::new(1)),
            damp_l: OnePole::new(1.0),
            damp_r: OnePole::new(1.0),
            tap_left: [0; 7],
            tap_right: [0; 7],
            decay: 0.2,
            wet1: 0.0,
            wet2: 0.0,
            params: ReverbParams::default(),
        };
        model.resize_for_samplerate(sample_rate);
        model.recompute(ParamMask::SET_ALL, &ReverbParams::default());
        model
    }

    fn resize_for_samplerate(&mut self, sample_rate: f32) {
        self.predelay
            .set_buffer(seconds_to_samples(PREDELAY_SECONDS, sample_rate));
        for (ap, &seconds) in self.input_ap.iter_mut().zip(INPUT_DIFFUSION_SECONDS.iter()) {
            ap.set_delay_len(seconds_to_samples(seconds, sample_rate));
        }
        for (ap, &seconds) in self.tank_ap.iter_mut().zip(TANK_AP_SECONDS.iter()) {
            ap.set_delay_len(seconds_to_samples(seconds, sample_rate));
        }
        for (dl, &seconds) in self.tank_delay.iter_mut().zip(TANK_DELAY_SECONDS.iter()) {
            dl.set_buffer(seconds_to_samples(seconds, sample_rate));
        }
        for (slot, &seconds) in self.tap_left.iter_mut().zip(TAP_SECONDS_LEFT.iter()) {
            *slot = seconds_to_tap_offset(seconds, sample_rate);
        }
        for (slot, &seconds) in self.tap_right.iter_mut().zip(TAP_SECONDS_RIGHT.iter()) {
            *slot = seconds_to_tap_offset(seconds, sample_rate);
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

        self.decay = 0.2 + params.roomsize * 0.78;
        self.damp_l.set_b0(1.0 - params.damping);
        self.damp_r.set_b0(1.0 - params.damping);

        let width_norm = params.width / 100.0;
        let wet = params.level / (1.0 + width_norm * 0.2);
        let (wet1, wet2) = wet1_wet2(wet, params.width);
        self.wet1 = wet1;
        self.wet2 = wet2;
    }

    #[inline]
    fn tick(&mut self, dry: f32) -> (f32, f32) {
        let x = dry * TRIM;
        let p = self.predelay.process(x);
        let b = self.bandwidth.process(p);

        let mut s = b;
        for ap in &mut self.input_ap {
            s = ap.process(s);
        }

        // Snapshot both cross-tank taps before either tank advances this
        // sample: both reads must see the *previous* sample's output.
        let prev_td3_last = self.tank_delay[3].last_output();
        let prev_td1_last = self.tank_delay[1].last_output();
        let decay = self.decay;

        let mut l = s + decay * prev_td3_last;
        l = self.tank_ap[0].process(l);
        l = self.tank_delay[0].process(l);
        let damp_l = self.damp_l.process(l);
        l = self.tank_ap[1].process(decay * damp_l);
        l = self.tank_delay[1].process(l);

        let mut r = s + decay * prev_td1_last;
        r = self.tank_ap[2].process(r);
        r = self.tank_delay[2].process(r);
        let damp_r = self.damp_r.process(r);
        r = self.tank_ap[3].process(decay * damp_r);
        r = self.tank_delay[3].process(r);

        let tl = self.tap_left;
        let tr = self.tap_right;

        let out_left = self.tank_delay[2].read_tap(tl[0]) + self.tank_delay[2].read_tap(tl[1])
            - self.tank_ap[3].read_tap(tl[2])
            + self.tank_delay[3].read_tap(tl[3])
            - self.tank_delay[0].read_tap(tl[4])
            - self.tank_ap[1].read_tap(tl[5])
            - self.tank_delay[1].read_tap(tl[6]);

        let out_right = self.tank_delay[0].read_tap(tr[0]) + self.tank_delay[0].read_tap(tr[1])
            - self.tank_ap[1].read_tap(tr[2])
            + self.tank_delay[1].read_tap(tr[3])
            - self.tank_delay[2].read_tap(tr[4])
            - self.tank_ap[3].read_tap(tr[5])
            - self.tank_delay[3].read_tap(tr[6]);

        let mix_l = out_left * self.wet1 + out_right * self.wet2;
        let mix_r = out_right * self.wet1 + out_left * self.wet2;
        (mix_l, mix_r)
    }
}

impl ReverbModel for DattorroModel {
    fn process_mix(&mut self, input: &[f32], left_out: &mut [f32], right_out: &mut [f32]) {
        debug_assert_eq!(input.len(), left_out.len());
        debug_assert_eq!(input.len(), right_out.len());
        if input.len() != left_out.len() || input.len() != right_out.len() {
            log::warn!("dattorro: mismatched buffer lengths passed to process_mix, ignoring call");
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
            log::warn!("dattorro: mismatched buffer lengths passed to process_replace, ignoring call");
            return;
        }
        for i in 0..input.len() {
            let (l, r) = self.tick(input[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    fn reset(&mut self) {
        self.predelay.reset();
        self.bandwidth.reset();
        for ap in self.input_ap.iter_mut().chain(self.tank_ap.iter_mut()) {
            ap.reset();
        }
        for dl in &mut self.tank_delay {
            dl.reset();
        }
        self.damp_l.reset();
        self.damp_r.reset();
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
