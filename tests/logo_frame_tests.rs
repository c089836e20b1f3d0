//! Logo framer integration tests: S7 and the encode/decode round-trip
//! invariant (#8).

use mpx_rds::constants::LOGO_MAGIC;
use mpx_rds::rds::logo::{decode, encode};

#[test]
fn s7_sixteen_by_eight_frame_is_168_bits() {
    let raster = vec![0u8; 16 * 8];
    let bits = encode(&raster, 16, 8).unwrap();
    assert_eq!(bits.len(), 168);

    let header = bits[0..8]
        .iter()
        .fold(0u32, |acc, &b| (acc << 1) | b as u32);
    assert_eq!(header, LOGO_MAGIC as u32);
}

#[test]
fn invariant_roundtrip_preserves_dimensions_and_payload() {
    let mut raster = vec![0u8; 32 * 16];
    for (i, p) in raster.iter_mut().enumerate() {
        *p = ((i * 37) % 256) as u8;
    }

    let frame = encode(&raster, 32, 16).unwrap();
    let (header, payload) = decode(&frame).unwrap();

    assert_eq!(header.width, 32);
    assert_eq!(header.height, 16);
    assert_eq!(payload.len(), 32 * 16);

    let mean = raster.iter().map(|&p| p as u32).sum::<u32>() as f64 / raster.len() as f64;
    for (i, &p) in raster.iter().enumerate() {
        assert_eq!(payload[i], p as f64 >= mean);
    }
}

#[test]
fn rejects_dimensions_beyond_the_maximum() {
    let raster = vec![0u8; 65 * 10];
    assert!(encode(&raster, 65, 10).is_err());
}

#[test]
fn decode_rejects_a_corrupted_frame() {
    let raster = vec![200u8; 8 * 8];
    let mut frame = encode(&raster, 8, 8).unwrap();
    frame[30] = !frame[30];
    assert!(decode(&frame).is_err());
}
