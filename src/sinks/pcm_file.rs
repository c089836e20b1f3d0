//! WAV/PCM file sink backed by `hound`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::MpxError;
use crate::sinks::Sink;

/// Writes composed MPX samples to a single-channel 32-bit float WAV file.
pub struct PcmFileSink {
    writer: Option<WavWriter<BufWriter<File>>>,
}

impl PcmFileSink {
    pub fn create(path: impl AsRef<Path>, sample_rate_hz: u32) -> Result<Self, MpxError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: sample_rate_hz,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let writer = WavWriter::create(path, spec).map_err(|e| MpxError::SinkIo(e.to_string()))?;
        Ok(Self { writer: Some(writer) })
    }
}

impl Sink for PcmFileSink {
    fn write_block(&mut self, samples: &[f32]) -> Result<(), MpxError> {
        let writer = self.writer.as_mut().ok_or(MpxError::SinkClosed)?;
        for &s in samples {
            writer
                .write_sample(s)
                .map_err(|e| MpxError::SinkIo(e.to_string()))?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), MpxError> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().map_err(|e| MpxError::SinkIo(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for PcmFileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
