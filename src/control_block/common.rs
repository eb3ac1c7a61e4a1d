// SPDX-License-Identifier: AGPL-3.0-or-later GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result};

use crate::models::codec::{get_be16, get_be32, put_be16, put_be32};

pub const READ_10: u8 = 0x28;
pub const WRITE_10: u8 = 0x2A;

/// Block range carried by a READ(10) / WRITE(10) CDB.
///
/// Layout (SBC):
/// - bytes 2..5 : LOGICAL BLOCK ADDRESS (big-endian, 32-bit)
/// - bytes 7..8 : TRANSFER LENGTH in blocks (big-endian, 16-bit)
///
/// A transfer length of 0 means "no blocks" on this target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataRequest {
    pub first_lba: u32,
    pub block_count: u16,
}

impl DataRequest {
    pub const LBA_OFFSET: usize = 2;
    pub const COUNT_OFFSET: usize = 7;

    pub const fn new(first_lba: u32, block_count: u16) -> Self {
        Self {
            first_lba,
            block_count,
        }
    }

    /// Decode the LBA and block count of a 10-byte data CDB.
    pub fn decode(cdb: &[u8]) -> Result<Self> {
        let first_lba =
            get_be32(cdb, Self::LBA_OFFSET).context("READ/WRITE(10): LBA field")?;
        let block_count = get_be16(cdb, Self::COUNT_OFFSET)
            .context("READ/WRITE(10): TRANSFER LENGTH field")?;
        Ok(Self {
            first_lba,
            block_count,
        })
    }

    /// Write the LBA and block count back into their CDB fields. Other bytes
    /// are left untouched.
    pub fn encode_into(&self, cdb: &mut [u8]) -> Result<()> {
        put_be32(cdb, Self::LBA_OFFSET, self.first_lba)
            .context("READ/WRITE(10): LBA field")?;
        put_be16(cdb, Self::COUNT_OFFSET, self.block_count)
            .context("READ/WRITE(10): TRANSFER LENGTH field")
    }

    /// One past the last block touched. Computed in 64 bits so a request near
    /// `u32::MAX` cannot wrap into range.
    #[inline]
    pub fn end_lba(&self) -> u64 {
        u64::from(self.first_lba) + u64::from(self.block_count)
    }

    #[inline]
    pub fn fits_within(&self, block_count: u32) -> bool {
        self.end_lba() <= u64::from(block_count)
    }

    #[inline]
    pub fn byte_len(&self, block_size: u32) -> u64 {
        u64::from(self.block_count) * u64::from(block_size)
    }
}

/// Build a padded 16-byte SCSI WRITE(10) CDB.
///
/// * `lba`     – 32-bit Logical-Block Address
/// * `blocks`  – number of contiguous blocks (u16)
/// * `flags`   – WRPROTECT/DPO/FUA (bits 7:5, 4, 3)
/// * `control` – control byte
pub fn build_write10(cdb: &mut [u8; 16], lba: u32, blocks: u16, flags: u8, control: u8) {
    fill_data10(cdb, WRITE_10, DataRequest::new(lba, blocks), flags, control);
}

/// Build a padded 16-byte **SCSI READ(10)** CDB.
///
/// Layout (SBC):
/// - byte 0      : OPERATION CODE = 0x28
/// - byte 1      : flags (masked to RDPROTECT/DPO/FUA)
/// - bytes 2..5  : LBA (big-endian, 32-bit)
/// - byte 6      : GROUP NUMBER, left 0
/// - bytes 7..8  : TRANSFER LENGTH (big-endian, 16-bit)
/// - byte 9      : CONTROL
///
/// The remaining six bytes are zero padding; a USB bulk-only CBW carries a
/// 16-byte command block field as well.
pub fn build_read10(cdb: &mut [u8; 16], lba: u32, blocks: u16, flags: u8, control: u8) {
    fill_data10(cdb, READ_10, DataRequest::new(lba, blocks), flags, control);
}

#[inline]
fn fill_data10(cdb: &mut [u8; 16], opcode: u8, req: DataRequest, flags: u8, control: u8) {
    cdb.fill(0);
    cdb[0] = opcode;
    cdb[1] = flags & 0b1111_1000;
    cdb[2..6].copy_from_slice(&req.first_lba.to_be_bytes());
    cdb[7..9].copy_from_slice(&req.block_count.to_be_bytes());
    cdb[9] = control;
}
