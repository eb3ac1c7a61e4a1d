// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Block data phase of READ(10) / WRITE(10).
//!
//! One block at a time moves through the configuration's scratch buffer:
//!
//! ```text
//! READ : device --read_blocks--> scratch --transmit--> initiator
//! WRITE: initiator --receive--> scratch --write_blocks--> device
//! ```

use tracing::{trace, warn};

use crate::{
    control_block::common::DataRequest,
    target::{config::TargetConfig, device::BlockDeviceError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to initiator.
    Read,
    /// Initiator to device.
    Write,
}

/// How a data phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Every block moved (or, unchecked, every block was attempted).
    Complete,
    /// The transport moved fewer bytes than a block; `residue` counts the
    /// bytes of the whole request that never made it.
    Short { residue: u32 },
    /// The device refused a block.
    Device(BlockDeviceError),
}

/// Runs the per-block loop for an already range-checked request.
pub struct DataTransferEngine<'c, 'a> {
    config: &'c mut TargetConfig<'a>,
    checked: bool,
}

impl<'c, 'a> DataTransferEngine<'c, 'a> {
    pub fn new(config: &'c mut TargetConfig<'a>, checked: bool) -> Self {
        Self { config, checked }
    }

    pub fn run(&mut self, req: &DataRequest, dir: Direction) -> TransferOutcome {
        let block_size = self.config.device.info().block_size as usize;
        let total = req.byte_len(block_size as u32);
        let TargetConfig {
            device,
            transport,
            scratch,
            ..
        } = &mut *self.config;

        let got = scratch.len();
        let Some(block) = scratch.get_mut(..block_size) else {
            return TransferOutcome::Device(BlockDeviceError::BufferSize {
                need: block_size,
                got,
            });
        };

        for i in 0..u32::from(req.block_count) {
            // Range was checked against the device, so this cannot wrap.
            let lba = req.first_lba + i;
            let done = u64::from(i) * block_size as u64;

            match dir {
                Direction::Read => {
                    let rd = device.read_blocks(lba, block, 1);
                    if self.checked
                        && let Err(e) = rd
                    {
                        warn!("READ(10): block {lba} failed: {e}");
                        return TransferOutcome::Device(e);
                    }
                    let sent = transport.transmit(block);
                    if self.checked && sent < block_size {
                        return short(total, done + sent as u64, lba);
                    }
                },
                Direction::Write => {
                    let received = transport.receive(block);
                    if self.checked && received < block_size {
                        return short(total, done + received as u64, lba);
                    }
                    let wr = device.write_blocks(lba, block, 1);
                    if self.checked
                        && let Err(e) = wr
                    {
                        warn!("WRITE(10): block {lba} failed: {e}");
                        return TransferOutcome::Device(e);
                    }
                },
            }
            trace!(?dir, lba, "block moved");
        }

        TransferOutcome::Complete
    }
}

fn short(total: u64, moved: u64, lba: u32) -> TransferOutcome {
    let residue = u32::try_from(total.saturating_sub(moved)).unwrap_or(u32::MAX);
    warn!("short transfer at block {lba}: {residue} bytes left");
    TransferOutcome::Short { residue }
}
