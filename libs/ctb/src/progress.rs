use byteorder::{ByteOrder, LittleEndian};

use crate::error::ProgressError;
use crate::OFFSET_ENTRY_SIZE;

/// Cumulative end-of-layer byte offsets for one parsed file
#[derive(Clone, Debug)]
pub struct LayerOffsetIndex {
    offsets: Vec<u64>,
}

impl LayerOffsetIndex {
    /// Build an index from cumulative end-of-layer offsets
    pub fn new(offsets: Vec<u64>) -> Result<Self, ProgressError> {
        check_offsets(&offsets)?;

        log::debug!("built layer offset index with {} layers", offsets.len());

        Ok(Self { offsets })
    }

    /// Build an index by accumulating per-layer payload sizes
    pub fn from_layer_sizes(sizes: &[u32]) -> Result<Self, ProgressError> {
        let mut offsets = Vec::with_capacity(sizes.len());
        let mut total: u64 = 0;

        for size in sizes {
            total += u64::from(*size);
            offsets.push(total);
        }

        Self::new(offsets)
    }

    /// Read a packed little-endian offset table
    pub fn from_le_bytes(table: &[u8]) -> Result<Self, ProgressError> {
        if table.len() % OFFSET_ENTRY_SIZE != 0 {
            return Err(ProgressError::IncorrectSizeTable {
                expected: OFFSET_ENTRY_SIZE,
                received: table.len(),
            });
        }

        let offsets = table
            .chunks_exact(OFFSET_ENTRY_SIZE)
            .map(|entry| u64::from(LittleEndian::read_u32(entry)))
            .collect();

        Self::new(offsets)
    }

    /// Number of layers covered by the index
    pub fn layer_count(&self) -> usize {
        self.offsets.len()
    }

    /// Total number of payload bytes the printer will send
    pub fn total_bytes(&self) -> u64 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Translate a live byte counter into a 1-based layer number
    ///
    /// Counters must align exactly with a stored layer boundary; any other
    /// value fails the lookup.
    pub fn layer_for_byte_offset(&self, current_byte: u64) -> Result<usize, ProgressError> {
        if current_byte == 0 {
            return Ok(1);
        }

        match self.offsets.binary_search(&current_byte) {
            Ok(position) => Ok(position + 1),
            Err(_) => Err(ProgressError::UnknownOffset {
                received: current_byte,
            }),
        }
    }
}

fn check_offsets(offsets: &[u64]) -> Result<(), ProgressError> {
    for (position, pair) in offsets.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(ProgressError::NonIncreasingOffset {
                position: position + 1,
                previous: pair[0],
                received: pair[1],
            });
        }
    }

    Ok(())
}

/// Percentage of the file already sent to the printer
pub fn progress_percent(current_byte: u64, total_bytes: u64) -> f64 {
    if total_bytes == 0 {
        return 0.0;
    }

    100.0 * current_byte as f64 / total_bytes as f64
}
