/// Multiplier applied to the file seed when deriving an "86" keystream
pub const CIPHER86_SEED_MULTIPLIER: u32 = 763612588;
/// Increment applied to the file seed when deriving an "86" keystream
pub const CIPHER86_SEED_INCREMENT: u32 = 3634902051;
/// Multiplier applied to the slice index when deriving an "86" keystream
pub const CIPHER86_SLICE_MULTIPLIER: u32 = 504705229;
/// Increment applied to the slice index when deriving an "86" keystream
pub const CIPHER86_SLICE_INCREMENT: u32 = 3963439053;
/// Subtrahend applied to the file seed when deriving an "FDG" keystream
pub const CIPHER_FDG_SEED_DECREMENT: u32 = 499873475;
/// Mask folded into the file seed when deriving an "FDG" keystream
pub const CIPHER_FDG_SEED_MASK: u32 = 629023793;
/// Multiplier applied to the derived value when expanding an "FDG" key
pub const CIPHER_FDG_KEY_MULTIPLIER: u32 = 2184781565;
/// Mask folded into the slice index when expanding an "FDG" key
pub const CIPHER_FDG_SLICE_MASK: u32 = 285989581;
/// Size of the layer checksum digest (in bytes)
pub const DIGEST_LENGTH: usize = 32;
/// Size of one entry in a packed layer offset table (in bytes)
pub const OFFSET_ENTRY_SIZE: usize = 4;

static DEBUG: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

pub mod cipher;
pub mod digest;
pub mod error;
pub mod progress;

/// Get debug status value
pub fn get_debug() -> bool {
    DEBUG.load(std::sync::atomic::Ordering::Relaxed)
}

/// Change debug status value
pub fn set_debug(value: bool) {
    DEBUG.store(value, std::sync::atomic::Ordering::Relaxed)
}

#[cfg(test)]
mod tests;
