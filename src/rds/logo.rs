//! Experimental framed monochrome logo payload for the RDS2 sidebands.
//!
//! Frame format (repeating, all fields MSB-first):
//!
//! - 8 bits magic ([`LOGO_MAGIC`])
//! - 7 bits width (1..=64)
//! - 6 bits height (1..=32)
//! - 3 bits reserved (0)
//! - `width * height` bits, row-major, mean-thresholded, 1 = above mean
//! - 16 bits checksum: sum of the packed payload bytes, masked to 16 bits

use nom::bits::bits;
use nom::bits::complete::take as take_bits;
use nom::error::Error as NomError;
use nom::sequence::tuple;
use nom::IResult;

use crate::constants::{LOGO_MAGIC, LOGO_MAX_HEIGHT, LOGO_MAX_WIDTH};
use crate::error::MpxError;
use crate::util::bitwriter::{pack_bits_msb, BitWriter};

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoHeader {
    pub magic: u8,
    pub width: u32,
    pub height: u32,
    pub reserved: u8,
}

/// Encode a grayscale raster (row-major, one byte per pixel) into a
/// framed logo bitstream. Dimensions beyond the maximum are rejected
/// rather than silently resized, leaving downsampling to the caller.
pub fn encode(raster: &[u8], width: u32, height: u32) -> Result<Vec<bool>, MpxError> {
    if width == 0 || height == 0 {
        return Err(MpxError::LogoDimensionsZero { width, height });
    }
    if width > LOGO_MAX_WIDTH || height > LOGO_MAX_HEIGHT {
        return Err(MpxError::LogoDimensionsOutOfRange { width, height });
    }
    if raster.len() != (width * height) as usize {
        return Err(MpxError::Other(format!(
            "raster length {} does not match {}x{}",
            raster.len(),
            width,
            height
        )));
    }

    let mean = raster.iter().map(|&p| p as u32).sum::<u32>() as f64 / raster.len() as f64;

    let mut header = BitWriter::with_capacity(24);
    header.push_bits(LOGO_MAGIC as u32, 8);
    header.push_bits(width, 7);
    header.push_bits(height, 6);
    header.push_bits(0, 3);

    let mut payload = BitWriter::with_capacity(raster.len());
    for &pixel in raster {
        payload.push_bit(pixel as f64 >= mean);
    }

    let checksum = pack_bits_msb(payload.as_slice())
        .iter()
        .fold(0u32, |acc, &b| acc + b as u32)
        & 0xFFFF;

    let mut footer = BitWriter::with_capacity(16);
    footer.push_bits(checksum, 16);

    let mut frame = header;
    frame.extend(&payload);
    frame.extend(&footer);
    Ok(frame.into_bits())
}

fn header_parser(input: (&[u8], usize)) -> IResult<(&[u8], usize), (u8, u32, u32, u8), NomError<(&[u8], usize)>> {
    tuple((
        take_bits(8usize),
        take_bits(7usize),
        take_bits(6usize),
        take_bits(3usize),
    ))(input)
}

/// Decode a framed logo bitstream back into its header and the
/// row-major thresholded pixel bits (1 = above mean, per [`encode`]).
/// Rejects a checksum mismatch or a dimension out of range.
pub fn decode(frame: &[bool]) -> Result<(LogoHeader, Vec<bool>), MpxError> {
    if frame.len() < 24 + 16 {
        return Err(MpxError::Other("logo frame too short".to_string()));
    }

    let header_bytes = pack_bits_msb(&frame[0..24]);
    let parsed: IResult<&[u8], (u8, u32, u32, u8)> = bits(header_parser)(&header_bytes[..]);
    let (_, (magic, width, height, reserved)) =
        parsed.map_err(|e| MpxError::Other(format!("logo header parse failed: {e}")))?;

    if magic != LOGO_MAGIC {
        return Err(MpxError::Other(format!("bad logo magic {magic:#x}")));
    }
    if width == 0 || height == 0 {
        return Err(MpxError::LogoDimensionsZero { width, height });
    }
    if width > LOGO_MAX_WIDTH || height > LOGO_MAX_HEIGHT {
        return Err(MpxError::LogoDimensionsOutOfRange { width, height });
    }

    let payload_len = (width * height) as usize;
    let payload_start = 24;
    let payload_end = payload_start + payload_len;
    let checksum_start = payload_end;
    let checksum_end = checksum_start + 16;
    if frame.len() < checksum_end {
        return Err(MpxError::Other("logo frame truncated before checksum".to_string()));
    }

    let payload = frame[payload_start..payload_end].to_vec();
    let checksum_bits = &frame[checksum_start..checksum_end];
    let expected_checksum = checksum_bits
        .iter()
        .fold(0u32, |acc, &b| (acc << 1) | b as u32);

    let actual_checksum = pack_bits_msb(&payload)
        .iter()
        .fold(0u32, |acc, &b| acc + b as u32)
        & 0xFFFF;

    if actual_checksum != expected_checksum {
        return Err(MpxError::Other(format!(
            "logo checksum mismatch: expected {expected_checksum:#06x}, got {actual_checksum:#06x}"
        )));
    }

    Ok((
        LogoHeader {
            magic,
            width,
            height,
            reserved,
        },
        payload,
    ))
}
