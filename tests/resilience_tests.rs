//! Resilience tests - damaged or foreign carriers must fail cleanly.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use stegox::config::{HEADER_BITS, LENGTH_FIELD_SIZE};
use stegox::stego::capacity;
use stegox::{Carrier, CodecConfig, Error, ImageCarrier, KdfParams, MediaFormat, StegoCodec};

fn test_codec() -> StegoCodec {
    StegoCodec::new(CodecConfig::new(KdfParams::fast_insecure())).expect("valid config")
}

fn noise_image(units: usize, seed: u64) -> ImageCarrier {
    let mut data = vec![0u8; units];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    ImageCarrier::new(units as u32, 1, 1, MediaFormat::Png, data).expect("valid image")
}

/// Flip the least significant bit of one unit.
fn flip_lsb(carrier: &ImageCarrier, index: usize) -> ImageCarrier {
    let mut units = carrier.units().to_vec();
    units[index] ^= 1;
    carrier.with_units(units)
}

fn is_rejection(result: &stegox::Result<Vec<u8>>) -> bool {
    matches!(
        result,
        Err(Error::AuthenticationFailure) | Err(Error::FrameFormat(_))
    )
}

#[test]
fn test_every_frame_bit_is_protected() {
    let codec = test_codec();
    let carrier = noise_image(1000, 1);
    let stego = codec.hide(&carrier, b"HI", "pw123").expect("hide");
    let frame_bits = capacity::frame_len(2) * 8;

    for index in 0..frame_bits {
        let damaged = flip_lsb(&stego, index);
        let result = codec.reveal(&damaged, "pw123");
        assert!(
            is_rejection(&result),
            "flipping bit {} was not detected: {:?}",
            index,
            result
        );
    }
}

#[test]
fn test_length_field_damage() {
    let codec = test_codec();
    let stego = codec
        .hide(&noise_image(4000, 2), &[7u8; 100], "pw")
        .expect("hide");

    // Lowest length bit: 112 becomes 113, not a block multiple
    let odd = flip_lsb(&stego, LENGTH_FIELD_SIZE * 8 - 1);
    assert!(matches!(codec.reveal(&odd, "pw"), Err(Error::FrameFormat(_))));

    // Highest length bit: claims far more than the carrier holds
    let huge = flip_lsb(&stego, 0);
    assert!(matches!(codec.reveal(&huge, "pw"), Err(Error::FrameFormat(_))));

    // 112 becomes 96: a shorter, well-formed frame that fails the tag
    let shorter = flip_lsb(&stego, LENGTH_FIELD_SIZE * 8 - 5);
    assert!(matches!(
        codec.reveal(&shorter, "pw"),
        Err(Error::AuthenticationFailure)
    ));
}

#[test]
fn test_damage_past_frame_is_harmless() {
    let codec = test_codec();
    let carrier = noise_image(2000, 3);
    let stego = codec.hide(&carrier, b"HI", "pw").expect("hide");
    let frame_bits = capacity::frame_len(2) * 8;

    let mut units = stego.units().to_vec();
    for unit in &mut units[frame_bits..] {
        *unit = !*unit;
    }
    let scribbled = stego.with_units(units);

    assert_eq!(codec.reveal(&scribbled, "pw").expect("reveal"), b"HI");
}

#[test]
fn test_high_bit_damage_is_harmless() {
    let codec = test_codec();
    let stego = codec.hide(&noise_image(1000, 4), b"HI", "pw").expect("hide");

    let units = stego.units().iter().map(|u| u ^ 0b1111_1110).collect();
    let recolored = stego.with_units(units);

    assert_eq!(codec.reveal(&recolored, "pw").expect("reveal"), b"HI");
}

#[test]
fn test_random_carriers_never_reveal() {
    let codec = test_codec();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..50 {
        let units = rng.gen_range(0..5000);
        let carrier = noise_image(units, rng.gen());
        let result = codec.reveal(&carrier, "pw");
        assert!(is_rejection(&result), "{} units: {:?}", units, result);
    }
}

#[test]
fn test_zeroed_carrier_is_not_a_frame() {
    let carrier = ImageCarrier::new(100, 10, 1, MediaFormat::Png, vec![0u8; 1000]).expect("image");

    // A zero length field is never produced by hide
    assert!(matches!(
        test_codec().reveal(&carrier, "pw"),
        Err(Error::FrameFormat(_))
    ));
}

#[test]
fn test_truncated_carrier() {
    let codec = test_codec();
    let stego = codec.hide(&noise_image(2000, 6), &[1u8; 40], "pw").expect("hide");
    let frame_bits = capacity::frame_len(40) * 8;

    for keep in [0, HEADER_BITS / 2, HEADER_BITS, frame_bits - 1] {
        let units = stego.units()[..keep].to_vec();
        let cropped =
            ImageCarrier::new(keep as u32, 1, 1, MediaFormat::Png, units).expect("image");
        let result = codec.reveal(&cropped, "pw");
        assert!(
            matches!(result, Err(Error::FrameFormat(_))),
            "{} units: {:?}",
            keep,
            result
        );
    }
}

#[test]
fn test_rehiding_replaces_previous_message() {
    let codec = test_codec();
    let carrier = noise_image(3000, 7);

    let first = codec.hide(&carrier, b"first message, quite a bit longer", "one").expect("hide");
    let second = codec.hide(&first, b"second", "two").expect("hide");

    assert_eq!(codec.reveal(&second, "two").expect("reveal"), b"second");
    assert!(is_rejection(&codec.reveal(&second, "one")));
}
