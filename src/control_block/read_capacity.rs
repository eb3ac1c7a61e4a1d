// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Result, anyhow};
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout,
    byteorder::{BigEndian, U32},
};

pub const READ_CAPACITY_10: u8 = 0x25;

/// Size of READ CAPACITY(10) parameter data.
pub const READ_CAPACITY_10_LEN: usize = 8;

/// Build a padded 16-byte **SCSI READ CAPACITY(10)** CDB (opcode 0x25).
///
/// Parameters:
/// - `cdb`     : output buffer (zeroed; first 10 bytes used)
/// - `lba`     : 32-bit LBA hint (meaningful only when `pmi` = true; else set
///   0)
/// - `pmi`     : Partial Medium Indicator
/// - `control` : CONTROL byte
///
/// The target ignores LBA and PMI and always reports the last block of the
/// medium.
#[inline]
pub fn build_read_capacity10(cdb: &mut [u8; 16], lba: u32, pmi: bool, control: u8) {
    cdb.fill(0);
    cdb[0] = READ_CAPACITY_10;
    cdb[2..6].copy_from_slice(&lba.to_be_bytes());
    cdb[8] = if pmi { 0x01 } else { 0x00 };
    cdb[9] = control;
}

/// 8-byte parameter data returned by READ CAPACITY(10).
///
/// Both fields are big-endian on the wire; the `U32<BigEndian>` wrappers keep
/// them that way in memory, so the struct bytes are the response bytes on
/// any host.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct ReadCapacity10Response {
    /// Highest valid LBA (bytes 0-3)
    pub max_lba: U32<BigEndian>,
    /// Block length in bytes (bytes 4-7)
    pub block_len: U32<BigEndian>,
}

impl ReadCapacity10Response {
    /// Response for a device of `block_count` blocks of `block_size` bytes.
    ///
    /// The last LBA is `block_count - 1`, wrapping to `0xFFFF_FFFF` for an
    /// empty device.
    #[inline]
    pub fn new(block_size: u32, block_count: u32) -> Self {
        Self {
            max_lba: U32::new(block_count.wrapping_sub(1)),
            block_len: U32::new(block_size),
        }
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; READ_CAPACITY_10_LEN] {
        let mut out = [0u8; READ_CAPACITY_10_LEN];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// Parse READ CAPACITY(10) parameter data (needs ≥ 8 bytes).
    #[inline]
    pub fn parse(buf: &[u8]) -> Result<&Self> {
        let (raw, _rest) = Self::ref_from_prefix(buf)
            .map_err(|_| anyhow!("READ CAPACITY(10): need ≥ 8 bytes, got {}", buf.len()))?;
        Ok(raw)
    }

    #[inline]
    pub fn total_bytes(&self) -> u64 {
        (self.max_lba.get() as u64 + 1) * self.block_len.get() as u64
    }

    /// If true, the medium is too large for the 10-byte form.
    #[inline]
    pub fn indicates_overflow(&self) -> bool {
        self.max_lba.get() == u32::MAX
    }
}
