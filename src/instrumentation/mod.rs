//! Instrumentation
//!
//! Observability for a running MPX/RDS stream: non-fatal event counters
//! (underruns, sink-closed, payload truncation) exported as JSON for an
//! external monitoring collaborator. See [`stats`] for the counters
//! themselves.

pub mod stats;

pub use stats::{update_stream_event, StreamEvent, StreamStats, StreamStatsExport};
