// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{cell::RefCell, rc::Rc};

use anyhow::{Result, ensure};
use tracing::trace;

use crate::target::device::{BlockDevice, BlockDeviceError, BlockDeviceInfo};

#[derive(Debug)]
struct Disk {
    info: BlockDeviceInfo,
    data: Vec<u8>,
    fail_lba: Option<u32>,
}

impl Disk {
    fn span(&self, lba: u32, count: u32) -> Result<core::ops::Range<usize>, BlockDeviceError> {
        let end = u64::from(lba) + u64::from(count);
        if end > u64::from(self.info.block_count) {
            return Err(BlockDeviceError::OutOfRange { lba, count });
        }
        let bs = self.info.block_size as usize;
        let start = lba as usize * bs;
        Ok(start..start + count as usize * bs)
    }

    fn hits_failure(&self, lba: u32, count: u32) -> Option<u32> {
        let end = u64::from(lba) + u64::from(count);
        self.fail_lba
            .filter(|&f| f >= lba && u64::from(f) < end)
    }
}

/// RAM disk. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct MemBlockDevice {
    inner: Rc<RefCell<Disk>>,
}

impl MemBlockDevice {
    /// A zero-filled disk of `block_count` blocks of `block_size` bytes.
    pub fn new(block_size: u32, block_count: u32) -> Result<Self> {
        Self::from_info(BlockDeviceInfo {
            block_size,
            block_count,
            write_protected: false,
        })
    }

    pub fn from_info(info: BlockDeviceInfo) -> Result<Self> {
        ensure!(info.block_size > 0, "block size must be nonzero");
        let len = usize::try_from(info.capacity_bytes())?;
        Ok(Self {
            inner: Rc::new(RefCell::new(Disk {
                info,
                data: vec![0u8; len],
                fail_lba: None,
            })),
        })
    }

    /// Fill every block with a pattern that identifies it: the first four
    /// bytes are the LBA big-endian, the rest is `lba as u8` repeated.
    pub fn fill_pattern(&self) {
        let mut disk = self.inner.borrow_mut();
        let bs = disk.info.block_size as usize;
        for (lba, block) in disk.data.chunks_exact_mut(bs).enumerate() {
            block.fill(lba as u8);
            let tag = (lba as u32).to_be_bytes();
            let n = tag.len().min(bs);
            block[..n].copy_from_slice(&tag[..n]);
        }
    }

    pub fn set_write_protected(&self, wp: bool) {
        self.inner.borrow_mut().info.write_protected = wp;
    }

    /// Make every read or write touching `lba` fail. `None` clears it.
    pub fn inject_failure(&self, lba: Option<u32>) {
        self.inner.borrow_mut().fail_lba = lba;
    }

    /// Copy of one block, or `None` past the end.
    pub fn block(&self, lba: u32) -> Option<Vec<u8>> {
        let disk = self.inner.borrow();
        let range = disk.span(lba, 1).ok()?;
        disk.data.get(range).map(<[u8]>::to_vec)
    }

    /// Copy of `count` blocks starting at `lba`.
    pub fn blocks(&self, lba: u32, count: u32) -> Option<Vec<u8>> {
        let disk = self.inner.borrow();
        let range = disk.span(lba, count).ok()?;
        disk.data.get(range).map(<[u8]>::to_vec)
    }
}

impl BlockDevice for MemBlockDevice {
    fn info(&self) -> BlockDeviceInfo {
        self.inner.borrow().info
    }

    fn read_blocks(&mut self, lba: u32, buf: &mut [u8], count: u32) -> Result<(), BlockDeviceError> {
        let disk = self.inner.borrow();
        let range = disk.span(lba, count)?;
        if let Some(bad) = disk.hits_failure(lba, count) {
            return Err(BlockDeviceError::Read(bad));
        }
        let need = range.len();
        let got = buf.len();
        let dst = buf
            .get_mut(..need)
            .ok_or(BlockDeviceError::BufferSize { need, got })?;
        dst.copy_from_slice(&disk.data[range]);
        trace!(lba, count, "ram disk read");
        Ok(())
    }

    fn write_blocks(&mut self, lba: u32, buf: &[u8], count: u32) -> Result<(), BlockDeviceError> {
        let mut disk = self.inner.borrow_mut();
        if disk.info.write_protected {
            return Err(BlockDeviceError::WriteProtected);
        }
        let range = disk.span(lba, count)?;
        if let Some(bad) = disk.hits_failure(lba, count) {
            return Err(BlockDeviceError::Write(bad));
        }
        let need = range.len();
        let src = buf.get(..need).ok_or(BlockDeviceError::BufferSize {
            need,
            got: buf.len(),
        })?;
        disk.data[range].copy_from_slice(src);
        trace!(lba, count, "ram disk write");
        Ok(())
    }
}
