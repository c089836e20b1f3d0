//! Group-builder integration tests (S2-S4, invariants #2/#3).

use mpx_rds::config::RdsConfig;
use mpx_rds::rds::group::{build_group_0a, build_group_2a};

fn bits_to_u32(bits: &[bool]) -> u32 {
    bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32)
}

#[test]
fn s3_ps_roundtrip_across_segments() {
    let cfg = RdsConfig::new(0x1234, "TESTFM");

    let seg2 = build_group_0a(&cfg, 2).unwrap();
    assert_eq!(bits_to_u32(&seg2[78..94]), 0x464D); // "FM"

    let seg3 = build_group_0a(&cfg, 3).unwrap();
    assert_eq!(bits_to_u32(&seg3[78..94]), 0x2020); // padding
}

#[test]
fn s4_rt_segments_carry_four_characters_each() {
    let mut cfg = RdsConfig::new(0x1234, "TESTFM");
    cfg.radiotext = "HELLO WORLD".to_string();

    let seg0 = build_group_2a(&cfg, 0).unwrap();
    assert_eq!(bits_to_u32(&seg0[52..68]), 0x4845);
    assert_eq!(bits_to_u32(&seg0[68..84]), 0x4C4C);

    let seg2 = build_group_2a(&cfg, 2).unwrap();
    assert_eq!(bits_to_u32(&seg2[52..68]), 0x4F52);
    assert_eq!(bits_to_u32(&seg2[68..84]), 0x4C44);
}

#[test]
fn invariant_every_group_is_104_bits() {
    let cfg = RdsConfig::new(0xBEEF, "ABCDEFGH");
    for seg in 0..4u8 {
        assert_eq!(build_group_0a(&cfg, seg).unwrap().len(), 104);
    }
    for seg in 0..16u8 {
        assert_eq!(build_group_2a(&cfg, seg).unwrap().len(), 104);
    }
}

#[test]
fn invariant_block_a_always_carries_the_pi_code() {
    let cfg = RdsConfig::new(0x5A5A, "ABCDEFGH");
    let bits = build_group_0a(&cfg, 0).unwrap();
    assert_eq!(bits_to_u32(&bits[0..16]), 0x5A5A);
    let bits2 = build_group_2a(&cfg, 0).unwrap();
    assert_eq!(bits_to_u32(&bits2[0..16]), 0x5A5A);
}

#[test]
fn non_latin1_characters_are_rejected() {
    let cfg = RdsConfig::new(0x1234, "\u{1F600}BAD");
    assert!(build_group_0a(&cfg, 0).is_err());
}
