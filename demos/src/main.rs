//! Synthesizes an MPX+RDS signal against a synthetic test tone and
//! writes it to a WAV file, exercising the library end-to-end.

use std::path::PathBuf;

use clap::Parser;
use mpx_rds::config::{db_to_linear, MpxConfig, RdsConfig, StreamConfig};
use mpx_rds::sinks::{PcmFileSink, Sink};
use mpx_rds::streaming::{AudioSource, StreamingDriver};
use mpx_rds::{init_logger, MpxError};

const BLOCK_FRAMES: usize = 4096;

#[derive(Parser, Debug)]
#[command(about = "Synthesize an MPX/RDS signal to a WAV file")]
struct Args {
    /// Output WAV path.
    #[arg(long, default_value = "mpx_demo.wav")]
    out: PathBuf,

    /// Working sample rate in Hz.
    #[arg(long, default_value_t = 192_000.0)]
    sample_rate: f64,

    /// Stream duration in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration_s: f64,

    /// Test-tone frequency in Hz.
    #[arg(long, default_value_t = 1000.0)]
    tone_hz: f64,

    /// Test-tone level in dBFS.
    #[arg(long, default_value_t = -12.0)]
    level_db: f64,

    /// 16-bit Program Identification code.
    #[arg(long, default_value_t = 0x1234)]
    pi_code: u16,

    /// Program Service name (up to 8 characters).
    #[arg(long, default_value = "DEMOFM")]
    ps: String,

    /// RadioText (up to 64 characters).
    #[arg(long, default_value = "")]
    rt: String,

    /// Enable the experimental RDS2 side-subcarriers.
    #[arg(long, default_value_t = false)]
    rds2: bool,
}

fn generate_tone_source(duration_s: f64, fs: f64, freq_hz: f64, level_db: f64) -> Box<AudioSource> {
    let amp = db_to_linear(level_db) as f32;
    let total_frames = (duration_s * fs).round() as usize;
    let mut produced = 0usize;
    let mut phase = 0.0f64;
    let phase_step = 2.0 * std::f64::consts::PI * freq_hz / fs;

    Box::new(move |n| {
        if produced >= total_frames {
            return None;
        }
        let take = n.min(total_frames - produced);
        let mut left = Vec::with_capacity(take);
        for _ in 0..take {
            left.push(amp * phase.sin() as f32);
            phase += phase_step;
        }
        produced += take;
        let right = left.clone();
        Some((left, right))
    })
}

fn run(args: Args) -> Result<(), MpxError> {
    let mut rds = RdsConfig::new(args.pi_code, args.ps);
    rds.radiotext = args.rt;

    let mut mpx = MpxConfig {
        sample_rate_hz: args.sample_rate,
        rds2_enabled: args.rds2,
        ..MpxConfig::default()
    };
    mpx.validate()?;

    let config = StreamConfig::new(rds, mpx);
    let source = generate_tone_source(args.duration_s, args.sample_rate, args.tone_hz, args.level_db);

    let mut driver = StreamingDriver::start("demo", config, BLOCK_FRAMES, source)?;
    let mut sink = PcmFileSink::create(&args.out, args.sample_rate as u32)?;

    while let Some(block) = driver.next_block() {
        sink.write_block(&block)?;
    }
    sink.close()?;
    driver.join();

    log::info!("wrote {}", args.out.display());
    Ok(())
}

fn main() {
    init_logger();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
