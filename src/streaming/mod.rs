//! Real-time producer/consumer streaming of composed MPX blocks.

pub mod driver;

pub use driver::{AudioSource, StreamingDriver};
