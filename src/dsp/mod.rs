//! Signal processing: filter design, BPSK subcarrier modulation, and
//! MPX composition.

pub mod filters;
pub mod modulator;
pub mod mpx;

pub use modulator::BpskModulator;
pub use mpx::MpxComposer;
