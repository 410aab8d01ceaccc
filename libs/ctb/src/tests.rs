use super::*;

use proptest::prelude::*;

use crate::cipher::{cipher86, cipher_fdg, xor_cipher, Keyring86, KeyringFdg};
use crate::digest::{compute_sha256, verify_sha256};
use crate::error::{CipherError, ProgressError};
use crate::progress::{progress_percent, LayerOffsetIndex};

fn sample_payload() -> Vec<u8> {
    (0..=15).collect()
}

#[test]
fn keyring86_derivation_matches_reference() {
    let keyring = Keyring86::new(12345, 1);

    assert_eq!(keyring.state(), (0xB191_3F6F, 0x8EAA_30C6, 0));
}

#[test]
fn keyring86_emits_key_bytes_little_endian_first() {
    let mut keyring = Keyring86::new(12345, 1);
    let stream: Vec<u8> = (0..8).map(|_| keyring.next_byte()).collect();

    assert_eq!(
        stream,
        vec![0xC6, 0x30, 0xAA, 0x8E, 0x35, 0x70, 0x3B, 0x40]
    );
}

#[test]
fn keyring86_refreshes_key_after_four_bytes() {
    let mut keyring = Keyring86::new(12345, 1);

    for _ in 0..4 {
        keyring.next_byte();
    }

    let (initial, key, cursor) = keyring.state();
    assert_eq!(initial, 0xB191_3F6F);
    assert_eq!(key, 0x8EAA_30C6_u32.wrapping_add(0xB191_3F6F));
    assert_eq!(key, 0x403B_7035);
    assert_eq!(cursor, 0);
}

#[test]
fn cipher86_matches_reference_vector() {
    let output = cipher86(12345, 1, &sample_payload());

    assert_eq!(
        output,
        vec![
            0xC6, 0x31, 0xA8, 0x8D, 0x31, 0x75, 0x3D, 0x47, 0xAC, 0xA6, 0xC6, 0xFA, 0x1F, 0xE2,
            0x53, 0xAC,
        ]
    );
}

#[test]
fn keyring_fdg_derivation_matches_reference() {
    let keyring = KeyringFdg::new(0x1234_5678, 3);

    assert_eq!(keyring.state(), (0xD116_FB84, 0x7928_6358, 0));
}

#[test]
fn cipher_fdg_matches_reference_vector() {
    let output = cipher_fdg(0x1234_5678, 3, &sample_payload());

    assert_eq!(
        output,
        vec![
            0x58, 0x62, 0x2A, 0x7A, 0xD8, 0x5B, 0x39, 0x4D, 0x68, 0x53, 0x5C, 0x10, 0xE8, 0x58,
            0x63, 0xE3,
        ]
    );
}

#[test]
fn cipher_fdg_returns_the_transformed_payload() {
    let output = cipher_fdg(0x1234_5678, 3, &sample_payload());

    assert_eq!(output.len(), sample_payload().len());
    assert_ne!(output, sample_payload());
}

#[test]
fn ciphers_pass_data_through_when_seed_is_zero() {
    let payload = sample_payload();

    assert_eq!(cipher86(0, 7, &payload), payload);
    assert_eq!(cipher_fdg(0, 7, &payload), payload);
}

#[test]
fn cipher86_diverges_between_slices() {
    let payload = sample_payload();

    assert_ne!(cipher86(99, 1, &payload), cipher86(99, 2, &payload));
}

#[test]
fn xor_cipher_wraps_the_key() {
    let output = xor_cipher(b"abcdef", &[0xFF, 0x00]).expect("key is not empty");

    assert_eq!(output, vec![0x9E, 0x62, 0x9C, 0x64, 0x9A, 0x66]);
}

#[test]
fn xor_cipher_rejects_an_empty_key() {
    let result = xor_cipher(b"abcdef", &[]);

    assert!(matches!(result, Err(CipherError::EmptyKey)));
}

#[test]
fn sha256_matches_reference_vector() {
    let digest = compute_sha256(b"");

    assert_eq!(
        digest,
        [
            0xE3, 0xB0, 0xC4, 0x42, 0x98, 0xFC, 0x1C, 0x14, 0x9A, 0xFB, 0xF4, 0xC8, 0x99, 0x6F,
            0xB9, 0x24, 0x27, 0xAE, 0x41, 0xE4, 0x64, 0x9B, 0x93, 0x4C, 0xA4, 0x95, 0x99, 0x1B,
            0x78, 0x52, 0xB8, 0x55,
        ]
    );
}

#[test]
fn verify_sha256_accepts_a_matching_checksum() {
    let payload = sample_payload();
    let digest = compute_sha256(&payload);

    assert!(verify_sha256(&payload, &digest).is_ok());
}

#[test]
fn verify_sha256_reports_corrupted_data() {
    let digest = compute_sha256(b"layer");
    let error = verify_sha256(b"layers", &digest).expect_err("payload was corrupted");

    let message = error.to_string();
    assert!(message.contains("checksum mismatch"));
}

#[test]
fn layer_lookup_matches_boundary_table() {
    let index = LayerOffsetIndex::new(vec![100, 250, 400]).expect("offsets are increasing");

    assert_eq!(index.layer_for_byte_offset(0).unwrap(), 1);
    assert_eq!(index.layer_for_byte_offset(100).unwrap(), 1);
    assert_eq!(index.layer_for_byte_offset(250).unwrap(), 2);
    assert_eq!(index.layer_for_byte_offset(400).unwrap(), 3);
}

#[test]
fn layer_lookup_fails_between_boundaries() {
    let index = LayerOffsetIndex::new(vec![100, 250, 400]).expect("offsets are increasing");
    let result = index.layer_for_byte_offset(99);

    assert!(matches!(
        result,
        Err(ProgressError::UnknownOffset { received: 99 })
    ));
}

#[test]
fn index_rejects_non_increasing_offsets() {
    let result = LayerOffsetIndex::new(vec![100, 100, 400]);

    assert!(matches!(
        result,
        Err(ProgressError::NonIncreasingOffset {
            position: 1,
            previous: 100,
            received: 100,
        })
    ));
}

#[test]
fn index_accumulates_layer_sizes() {
    let index = LayerOffsetIndex::from_layer_sizes(&[100, 150, 150]).expect("sizes are nonzero");

    assert_eq!(index.layer_count(), 3);
    assert_eq!(index.total_bytes(), 400);
    assert_eq!(index.layer_for_byte_offset(250).unwrap(), 2);
}

#[test]
fn index_reads_a_packed_offset_table() {
    let mut table = Vec::new();
    for offset in [100_u32, 250, 400] {
        table.extend_from_slice(&offset.to_le_bytes());
    }

    let index = LayerOffsetIndex::from_le_bytes(&table).expect("table is well formed");

    assert_eq!(index.layer_count(), 3);
    assert_eq!(index.layer_for_byte_offset(400).unwrap(), 3);
}

#[test]
fn index_rejects_a_truncated_offset_table() {
    let result = LayerOffsetIndex::from_le_bytes(&[0x64, 0x00, 0x00, 0x00, 0xFA]);

    assert!(matches!(
        result,
        Err(ProgressError::IncorrectSizeTable {
            expected: OFFSET_ENTRY_SIZE,
            received: 5,
        })
    ));
}

#[test]
fn progress_percent_matches_status_report() {
    assert_eq!(progress_percent(200, 400), 50.0);
    assert_eq!(progress_percent(0, 400), 0.0);
    assert_eq!(progress_percent(0, 0), 0.0);
}

proptest! {
    #[test]
    fn cipher86_is_deterministic(
        seed in any::<u32>(),
        slice_index in any::<u32>(),
        data in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assert_eq!(
            cipher86(seed, slice_index, &data),
            cipher86(seed, slice_index, &data)
        );
    }

    #[test]
    fn cipher86_is_an_involution(
        seed in 1..u32::MAX,
        slice_index in any::<u32>(),
        data in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assert_eq!(cipher86(seed, slice_index, &cipher86(seed, slice_index, &data)), data);
    }

    #[test]
    fn cipher_fdg_is_an_involution(
        seed in 1..u32::MAX,
        slice_index in any::<u32>(),
        data in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assert_eq!(cipher_fdg(seed, slice_index, &cipher_fdg(seed, slice_index, &data)), data);
    }

    #[test]
    fn xor_cipher_round_trips(
        key in proptest::collection::vec(any::<u8>(), 1..32),
        data in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let masked = xor_cipher(&data, &key).expect("key is not empty");
        prop_assert_eq!(xor_cipher(&masked, &key).expect("key is not empty"), data);
    }
}
