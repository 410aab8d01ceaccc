use sha2::{Digest, Sha256};

use crate::error::DigestError;
use crate::DIGEST_LENGTH;

/// Compute the checksum digest of a decoded payload
pub fn compute_sha256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Check a decoded payload against its stored checksum
pub fn verify_sha256(data: &[u8], expected: &[u8; DIGEST_LENGTH]) -> Result<(), DigestError> {
    let received = compute_sha256(data);

    if &received != expected {
        return Err(DigestError::Mismatch {
            expected: encode_hex(expected),
            received: encode_hex(&received),
        });
    }

    Ok(())
}

fn encode_hex(digest: &[u8; DIGEST_LENGTH]) -> String {
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
