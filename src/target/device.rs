// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

/// Geometry and state reported by a block device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockDeviceInfo {
    /// Bytes per block.
    pub block_size: u32,
    /// Number of addressable blocks.
    pub block_count: u32,
    pub write_protected: bool,
}

impl BlockDeviceInfo {
    #[inline]
    pub fn capacity_bytes(&self) -> u64 {
        u64::from(self.block_size) * u64::from(self.block_count)
    }
}

/// Failures a block device can report for a single call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BlockDeviceError {
    #[error("blocks {lba}..{lba}+{count} are outside the medium")]
    OutOfRange { lba: u32, count: u32 },
    #[error("medium is write-protected")]
    WriteProtected,
    #[error("buffer holds {got} bytes, {need} required")]
    BufferSize { need: usize, got: usize },
    #[error("read failed at block {0}")]
    Read(u32),
    #[error("write failed at block {0}")]
    Write(u32),
}

/// Storage the target exposes. Implemented by the firmware's block driver
/// (SD card, flash translation layer, RAM disk...).
///
/// Calls are blocking; timeouts are the implementor's business.
pub trait BlockDevice {
    fn info(&self) -> BlockDeviceInfo;

    /// Read `count` blocks starting at `lba` into `buf`, which holds at least
    /// `count * block_size` bytes.
    fn read_blocks(&mut self, lba: u32, buf: &mut [u8], count: u32) -> Result<(), BlockDeviceError>;

    /// Write `count` blocks starting at `lba` from `buf`.
    fn write_blocks(&mut self, lba: u32, buf: &[u8], count: u32) -> Result<(), BlockDeviceError>;
}
