//! Property tests for the universally-quantified invariants in spec.md
//! §8, using `proptest` (already a teacher dependency).

use proptest::prelude::*;

use mpx_rds::config::{MpxConfig, RdsConfig};
use mpx_rds::constants::{OFFSET_A, OFFSET_B, OFFSET_C, OFFSET_D, MPX_CLIP};
use mpx_rds::dsp::MpxComposer;
use mpx_rds::rds::bitstream::BitstreamGenerator;
use mpx_rds::rds::crc::{block_checkword, crc10};

proptest! {
    #[test]
    fn checkword_always_within_ten_bits(word: u16) {
        prop_assert!(crc10(word) <= 0x3FF);
    }

    #[test]
    fn offset_xor_is_self_inverse(word: u16, offset_pick in 0u8..4) {
        let offset = [OFFSET_A, OFFSET_B, OFFSET_C, OFFSET_D][offset_pick as usize];
        let cw = crc10(word);
        let applied = block_checkword(word, offset);
        prop_assert_eq!((applied ^ offset) & 0x3FF, cw & 0x3FF);
    }

    #[test]
    fn bitstream_generate_is_resumable(a in 0usize..500, extra in 0usize..500) {
        let rds = RdsConfig::new(0x1234, "TESTFM");
        let total = a + extra;

        let mut whole = BitstreamGenerator::new(rds.clone()).unwrap();
        let reference = whole.generate(total);

        let mut split = BitstreamGenerator::new(rds).unwrap();
        let mut combined = split.generate(a);
        combined.extend(split.generate(extra));

        prop_assert_eq!(combined, reference);
    }

    #[test]
    fn mpx_output_is_always_clipped(gain in 0.1f32..20.0) {
        let mpx = MpxConfig { overall_gain: gain, ..MpxConfig::default() };
        let mut composer = MpxComposer::new(mpx).unwrap();
        let mut bits = BitstreamGenerator::new(RdsConfig::new(0x1234, "TESTFM")).unwrap();

        let left: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.05).sin()).collect();
        let right: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.03).cos()).collect();
        let out = composer.compose(&left, &right, &mut bits);

        for s in out {
            prop_assert!(s.abs() <= MPX_CLIP);
        }
    }
}
