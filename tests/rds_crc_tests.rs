//! CRC & block-packer integration tests (spec invariant #1, S1, S2).

use mpx_rds::constants::{OFFSET_A, OFFSET_B, OFFSET_C, OFFSET_D};
use mpx_rds::rds::crc::{block_checkword, crc10};
use mpx_rds::rds::group::pack_block;

fn bits_to_u32(bits: &[bool]) -> u32 {
    bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32)
}

#[test]
fn s1_crc_of_zero_is_zero() {
    assert_eq!(crc10(0x0000), 0);
}

#[test]
fn invariant_checkword_always_fits_ten_bits() {
    for word in 0..=0xFFFFu16 {
        if word % 97 != 0 {
            continue; // sample the space rather than exhaustively iterate
        }
        assert!(crc10(word) <= 0x3FF);
    }
}

#[test]
fn invariant_offset_xor_is_self_inverse() {
    let offsets = [OFFSET_A, OFFSET_B, OFFSET_C, OFFSET_D];
    for word in [0x0000u16, 0x1234, 0xBEEF, 0xFFFF] {
        let cw = crc10(word);
        for &offset in &offsets {
            let applied = block_checkword(word, offset);
            assert_eq!((applied ^ offset) & 0x3FF, cw & 0x3FF);
        }
    }
}

#[test]
fn s2_packed_block_a_layout() {
    let block = pack_block(0x1234, OFFSET_A);
    assert_eq!(block.len(), 26);
    assert_eq!(bits_to_u32(&block[0..16]), 0x1234);
    assert_eq!(bits_to_u32(&block[16..26]), block_checkword(0x1234, OFFSET_A) as u32);
}
