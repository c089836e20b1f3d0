//! Producer/consumer streaming driver.
//!
//! A background thread pulls stereo audio blocks from a caller-supplied
//! source, composes each into an MPX block, and pushes it onto a bounded
//! channel. A real-time audio callback (or any other consumer) drains
//! the channel non-blockingly via [`StreamingDriver::try_next_block`];
//! falling behind is recorded as an underrun rather than blocking the
//! callback. Ordering is preserved and no composed block is ever
//! dropped mid-flight — cancellation only stops the producer from
//! starting a *new* block.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, TryRecvError};

use crate::config::StreamConfig;
use crate::constants::STREAM_QUEUE_CAPACITY;
use crate::dsp::MpxComposer;
use crate::error::MpxError;
use crate::instrumentation::{update_stream_event, StreamEvent};
use crate::rds::bitstream::BitstreamGenerator;
use crate::util::logging::LogThrottle;

/// Underrun warnings are rate-limited to at most one per second so a
/// consumer that's badly behind doesn't flood the log.
const UNDERRUN_LOG_WINDOW_MS: u64 = 1000;
const UNDERRUN_LOG_CAP: u32 = 1;

/// Supplies stereo audio blocks of the requested frame count. Returning
/// `None` ends the stream after the current in-flight block drains.
pub type AudioSource = dyn FnMut(usize) -> Option<(Vec<f32>, Vec<f32>)> + Send;

pub struct StreamingDriver {
    stream_id: String,
    stop: Arc<AtomicBool>,
    receiver: Receiver<Vec<f32>>,
    handle: Option<JoinHandle<()>>,
    underrun_log: LogThrottle,
}

impl StreamingDriver {
    pub fn start(
        stream_id: impl Into<String>,
        config: StreamConfig,
        block_frames: usize,
        mut audio_source: Box<AudioSource>,
    ) -> Result<Self, MpxError> {
        config.mpx.validate()?;
        let stream_id = stream_id.into();

        let mut composer = MpxComposer::new(config.mpx)?;
        let mut bits = BitstreamGenerator::new(config.rds)?;

        let (tx, rx) = bounded(STREAM_QUEUE_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = stop.clone();
        let id_for_thread = stream_id.clone();

        let handle = thread::spawn(move || loop {
            if stop_for_thread.load(Ordering::Relaxed) {
                break;
            }
            let (left, right) = match audio_source(block_frames) {
                Some(block) => block,
                None => break,
            };
            let mpx_block = composer.compose(&left, &right, &mut bits);
            if tx.send(mpx_block).is_err() {
                update_stream_event(&id_for_thread, StreamEvent::SinkClosed);
                break;
            }
        });

        Ok(Self {
            stream_id,
            stop,
            receiver: rx,
            handle: Some(handle),
            underrun_log: LogThrottle::new(UNDERRUN_LOG_WINDOW_MS, UNDERRUN_LOG_CAP),
        })
    }

    /// Non-blocking pull for a real-time audio callback. An empty
    /// channel is recorded as an underrun and reported as `None` rather
    /// than blocking the caller.
    pub fn try_next_block(&mut self) -> Option<Vec<f32>> {
        match self.receiver.try_recv() {
            Ok(block) => Some(block),
            Err(TryRecvError::Empty) => {
                update_stream_event(&self.stream_id, StreamEvent::Underrun);
                if self.underrun_log.allow() {
                    log::warn!("stream '{}' underrun: producer fell behind", self.stream_id);
                }
                None
            }
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocking pull for non-real-time consumers (e.g. a file writer).
    pub fn next_block(&self) -> Option<Vec<f32>> {
        self.receiver.recv().ok()
    }

    /// Signal the producer to stop starting new blocks. Any block
    /// already in flight is still delivered.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Wait for the producer thread to exit.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StreamingDriver {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MpxConfig, RdsConfig};
    use std::sync::atomic::AtomicUsize;

    fn silent_source(total_blocks: usize) -> Box<AudioSource> {
        let produced = AtomicUsize::new(0);
        Box::new(move |n| {
            let i = produced.fetch_add(1, Ordering::Relaxed);
            if i >= total_blocks {
                None
            } else {
                Some((vec![0.0f32; n], vec![0.0f32; n]))
            }
        })
    }

    #[test]
    fn delivers_every_block_in_order_then_ends() {
        let config = StreamConfig::new(RdsConfig::new(0x1234, "TESTFM"), MpxConfig::default());
        let mut driver =
            StreamingDriver::start("test-stream", config, 256, silent_source(3)).unwrap();

        let mut received = 0;
        while let Some(block) = driver.next_block() {
            assert_eq!(block.len(), 256);
            received += 1;
        }
        assert_eq!(received, 3);
        driver.join();
    }

    #[test]
    fn rejects_sample_rate_below_minimum() {
        let mut mpx = MpxConfig::default();
        mpx.sample_rate_hz = 1000.0;
        let config = StreamConfig::new(RdsConfig::new(0x1234, "TESTFM"), mpx);
        let result = StreamingDriver::start("bad-rate", config, 256, silent_source(1));
        assert!(result.is_err());
    }

    #[test]
    fn stop_eventually_halts_the_producer() {
        let config = StreamConfig::new(RdsConfig::new(0x1234, "TESTFM"), MpxConfig::default());
        // An effectively endless source; `stop` must still let the
        // thread exit instead of hanging the test.
        let mut driver =
            StreamingDriver::start("endless", config, 64, silent_source(usize::MAX)).unwrap();
        let _ = driver.next_block();
        driver.stop();
        driver.join();
    }
}
