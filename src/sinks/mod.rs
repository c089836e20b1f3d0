//! Output sinks for composed MPX sample blocks.

pub mod pcm_file;

pub use pcm_file::PcmFileSink;

use crate::error::MpxError;

/// A destination for composed MPX sample blocks — a PCM file, an audio
/// callback ring buffer, or any other consumer draining blocks off a
/// [`crate::streaming::StreamingDriver`].
///
/// `write_block` after `close` returns [`MpxError::SinkClosed`] rather
/// than panicking, so a caller driving a sink from a loop over
/// `next_block`/`try_next_block` can treat it as an ordinary error.
pub trait Sink: Send {
    fn write_block(&mut self, samples: &[f32]) -> Result<(), MpxError>;
    fn close(&mut self) -> Result<(), MpxError>;
}
