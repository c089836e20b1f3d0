//! RDS bitstream construction: CRC, group packing, the scheduling
//! generator, and the experimental logo framer.

pub mod bitstream;
pub mod crc;
pub mod group;
pub mod logo;

pub use bitstream::BitstreamGenerator;
