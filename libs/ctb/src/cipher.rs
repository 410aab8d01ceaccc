use crate::error::CipherError;
use crate::{
    CIPHER86_SEED_INCREMENT, CIPHER86_SEED_MULTIPLIER, CIPHER86_SLICE_INCREMENT,
    CIPHER86_SLICE_MULTIPLIER, CIPHER_FDG_KEY_MULTIPLIER, CIPHER_FDG_SEED_DECREMENT,
    CIPHER_FDG_SEED_MASK, CIPHER_FDG_SLICE_MASK,
};

/// Keystream state for the "86" layer cipher
#[derive(Clone, Debug)]
pub struct Keyring86 {
    /// Per-keyring increment, constant after derivation
    initial: u32,
    /// Current 32-bit keystream word
    key: u32,
    /// Byte position inside the current word (0-3)
    cursor: u8,
}

impl Keyring86 {
    /// Derive a keystream for one (seed, slice) pair
    pub fn new(seed: u32, slice_index: u32) -> Self {
        let initial = seed
            .wrapping_mul(CIPHER86_SEED_MULTIPLIER)
            .wrapping_add(CIPHER86_SEED_INCREMENT);
        let key = slice_index
            .wrapping_mul(CIPHER86_SLICE_MULTIPLIER)
            .wrapping_add(CIPHER86_SLICE_INCREMENT)
            .wrapping_mul(initial);

        Self {
            initial,
            key,
            cursor: 0,
        }
    }

    /// Get the next keystream byte
    pub fn next_byte(&mut self) -> u8 {
        let byte = (self.key >> (8 * u32::from(self.cursor))) as u8;
        self.cursor += 1;

        if self.cursor & 3 == 0 {
            self.key = self.key.wrapping_add(self.initial);
            self.cursor = 0;
        }

        byte
    }

    /// Fold the keystream over a buffer in place
    pub fn apply(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_byte();
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> (u32, u32, u8) {
        (self.initial, self.key, self.cursor)
    }
}

/// Keystream state for the "FDG" layer cipher
#[derive(Clone, Debug)]
pub struct KeyringFdg {
    /// Per-keyring increment, constant after derivation
    initial: u32,
    /// Current 32-bit keystream word
    key: u32,
    /// Byte position inside the current word (0-3)
    cursor: u8,
}

impl KeyringFdg {
    /// Derive a keystream for one (seed, slice) pair
    pub fn new(seed: u32, slice_index: u32) -> Self {
        let initial = seed.wrapping_sub(CIPHER_FDG_SEED_DECREMENT) ^ CIPHER_FDG_SEED_MASK;
        let key = initial
            .wrapping_mul(CIPHER_FDG_KEY_MULTIPLIER)
            .wrapping_mul(slice_index ^ CIPHER_FDG_SLICE_MASK);

        Self {
            initial,
            key,
            cursor: 0,
        }
    }

    /// Get the next keystream byte
    pub fn next_byte(&mut self) -> u8 {
        let byte = (self.key >> (8 * u32::from(self.cursor))) as u8;
        self.cursor += 1;

        if self.cursor & 3 == 0 {
            self.key = self.key.wrapping_add(self.initial);
            self.cursor = 0;
        }

        byte
    }

    /// Fold the keystream over a buffer in place
    pub fn apply(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_byte();
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> (u32, u32, u8) {
        (self.initial, self.key, self.cursor)
    }
}

/// Decrypt or encrypt an "86" layer payload
pub fn cipher86(seed: u32, slice_index: u32, data: &[u8]) -> Vec<u8> {
    if seed == 0 {
        return data.to_vec();
    }

    log::debug!(
        "applying 86 keystream to {} bytes of slice {}",
        data.len(),
        slice_index
    );

    let mut keyring = Keyring86::new(seed, slice_index);
    let mut output = data.to_vec();
    keyring.apply(&mut output);

    output
}

/// Decrypt or encrypt an "FDG" layer payload
pub fn cipher_fdg(seed: u32, slice_index: u32, data: &[u8]) -> Vec<u8> {
    if seed == 0 {
        return data.to_vec();
    }

    log::debug!(
        "applying FDG keystream to {} bytes of slice {}",
        data.len(),
        slice_index
    );

    let mut keyring = KeyringFdg::new(seed, slice_index);
    let mut output = data.to_vec();
    keyring.apply(&mut output);

    output
}

/// Decrypt or encrypt a header region with a repeating key
pub fn xor_cipher(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    if key.is_empty() {
        return Err(CipherError::EmptyKey);
    }

    Ok(data
        .iter()
        .enumerate()
        .map(|(index, byte)| byte ^ key[index % key.len()])
        .collect())
}
