//! Non-interactive demo: render an impulse through a chosen reverb model
//! and report its tail energy and peak sample to stdout.
//!
//! Usage: revtool [freeverb|lexverb|dattorro]

use color_eyre::eyre::{eyre, Result};
use reverb_engine::{new_revmodel, ParamMask, ReverbParams, ReverbType, FLUID_BUFSIZE};

fn parse_model(arg: Option<String>) -> Result<ReverbType> {
    match arg.as_deref() {
        None | Some("freeverb") => Ok(ReverbType::Freeverb),
        Some("lexverb") => Ok(ReverbType::Lexverb),
        Some("dattorro") | Some("fdn") => Ok(ReverbType::Fdn),
        Some(other) => Err(eyre!("unknown model '{other}', expected freeverb|lexverb|dattorro")),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let reverb_type = parse_model(std::env::args().nth(1))?;
    let sample_rate = 48_000.0;

    let mut model = new_revmodel(sample_rate, sample_rate, reverb_type)?;
    model.set_params(
        ParamMask::SET_ALL,
        &ReverbParams {
            roomsize: 0.6,
            damping: 0.4,
            width: 100.0,
            level: 0.9,
        },
    );

    let total_samples = sample_rate as usize * 2; // 2 seconds of tail
    let mut peak = 0.0_f32;
    let mut energy = 0.0_f64;

    let mut input = [0.0_f32; FLUID_BUFSIZE];
    let mut left = [0.0_f32; FLUID_BUFSIZE];
    let mut right = [0.0_f32; FLUID_BUFSIZE];
    input[0] = 1.0;

    let mut rendered = 0;
    while rendered < total_samples {
        model.process_replace(&input, &mut left, &mut right);
        input.fill(0.0);
        for (&l, &r) in left.iter().zip(right.iter()) {
            peak = peak.max(l.abs()).max(r.abs());
            energy += (l as f64) * (l as f64) + (r as f64) * (r as f64);
        }
        rendered += FLUID_BUFSIZE;
    }

    println!("model: {reverb_type:?}");
    println!("peak sample: {peak:.6}");
    println!("tail energy: {energy:.6}");
    Ok(())
}
