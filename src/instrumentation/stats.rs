//! # Per-Stream Event Statistics
//!
//! Tracks the non-fatal conditions called out in the error-handling
//! design: audio-callback underruns, sink-closed events, and PS/RT
//! payload truncation. None of these are `MpxError` variants — they are
//! recovered locally and only need to be observable from the outside.
//!
//! ## Usage
//!
//! ```rust
//! use mpx_rds::instrumentation::stats::{update_stream_event, StreamEvent};
//!
//! update_stream_event("default", StreamEvent::Underrun);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

static STREAM_STATS: Lazy<Mutex<HashMap<String, Arc<Mutex<StreamStats>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Non-fatal events tracked per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamEvent {
    /// Audio callback found the bounded queue empty; silence was emitted.
    Underrun,
    /// The sink stopped accepting blocks.
    SinkClosed,
    /// A PS or RT field was truncated to fit its fixed width.
    PayloadTruncation,
}

/// Time-windowed counter for rate calculation (events/minute).
#[derive(Debug, Clone)]
struct WindowedCounter {
    windows: Vec<(Instant, u64)>,
    window_duration: Duration,
    max_windows: usize,
}

impl WindowedCounter {
    fn new(window_duration: Duration, max_windows: usize) -> Self {
        Self {
            windows: Vec::new(),
            window_duration,
            max_windows,
        }
    }

    fn increment(&mut self) {
        let now = Instant::now();
        self.cleanup_old_windows(now);

        if let Some(last) = self.windows.last_mut() {
            if now.duration_since(last.0) < self.window_duration {
                last.1 += 1;
                return;
            }
        }

        self.windows.push((now, 1));
    }

    fn get_rate(&mut self) -> f64 {
        let now = Instant::now();
        self.cleanup_old_windows(now);

        if self.windows.is_empty() {
            return 0.0;
        }

        let total: u64 = self.windows.iter().map(|(_, count)| count).sum();
        let duration = now.duration_since(self.windows[0].0).as_secs_f64();

        if duration > 0.0 {
            total as f64 / duration * 60.0
        } else {
            0.0
        }
    }

    fn cleanup_old_windows(&mut self, now: Instant) {
        let cutoff = self.window_duration * self.max_windows as u32;
        self.windows.retain(|(time, _)| now.duration_since(*time) < cutoff);

        if self.windows.len() > self.max_windows {
            self.windows.drain(0..self.windows.len() - self.max_windows);
        }
    }

    fn get_total(&self) -> u64 {
        self.windows.iter().map(|(_, count)| count).sum()
    }
}

/// Event counters for a single stream.
#[derive(Debug)]
pub struct StreamStats {
    pub stream_id: String,
    counters: HashMap<StreamEvent, WindowedCounter>,
    pub last_event: Option<SystemTime>,
    /// Underruns/minute above which a warning is logged.
    underrun_alert_threshold: f64,
}

impl StreamStats {
    pub fn new(stream_id: String) -> Self {
        Self {
            stream_id,
            counters: HashMap::new(),
            last_event: None,
            underrun_alert_threshold: 5.0,
        }
    }

    pub fn record(&mut self, event: StreamEvent) {
        let counter = self
            .counters
            .entry(event)
            .or_insert_with(|| WindowedCounter::new(Duration::from_secs(60), 10));
        counter.increment();
        self.last_event = Some(SystemTime::now());

        if event == StreamEvent::Underrun {
            let rate = counter.get_rate();
            if rate > self.underrun_alert_threshold {
                log::warn!(
                    "stream {} underrun rate {rate:.1}/min exceeds {:.1}/min",
                    self.stream_id,
                    self.underrun_alert_threshold
                );
            }
        }
    }

    pub fn count(&self, event: StreamEvent) -> u64 {
        self.counters.get(&event).map(|c| c.get_total()).unwrap_or(0)
    }

    pub fn rate(&mut self, event: StreamEvent) -> f64 {
        self.counters.get_mut(&event).map(|c| c.get_rate()).unwrap_or(0.0)
    }

    pub fn export(&self) -> StreamStatsExport {
        StreamStatsExport {
            stream_id: self.stream_id.clone(),
            underrun_count: self.count(StreamEvent::Underrun),
            sink_closed_count: self.count(StreamEvent::SinkClosed),
            truncation_count: self.count(StreamEvent::PayloadTruncation),
            last_event: self.last_event,
        }
    }
}

/// Exportable, serializable snapshot of a stream's event counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamStatsExport {
    pub stream_id: String,
    pub underrun_count: u64,
    pub sink_closed_count: u64,
    pub truncation_count: u64,
    pub last_event: Option<SystemTime>,
}

/// Get or create statistics for a stream.
pub fn get_stream_stats(stream_id: &str) -> Arc<Mutex<StreamStats>> {
    let mut registry = STREAM_STATS.lock().unwrap();
    registry
        .entry(stream_id.to_string())
        .or_insert_with(|| Arc::new(Mutex::new(StreamStats::new(stream_id.to_string()))))
        .clone()
}

/// Record an event for a stream, creating its counters on first use.
pub fn update_stream_event(stream_id: &str, event: StreamEvent) {
    let stats = get_stream_stats(stream_id);
    let mut stats = stats.lock().unwrap();
    stats.record(event);
}

/// Snapshot every tracked stream's counters.
pub fn export_all_stats() -> HashMap<String, StreamStatsExport> {
    let registry = STREAM_STATS.lock().unwrap();
    registry
        .iter()
        .map(|(id, stats)| (id.clone(), stats.lock().unwrap().export()))
        .collect()
}

/// Clear statistics for a specific stream (mainly for test isolation).
pub fn clear_stream_stats(stream_id: &str) {
    let mut registry = STREAM_STATS.lock().unwrap();
    registry.remove(stream_id);
}
