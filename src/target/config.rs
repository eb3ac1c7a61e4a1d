// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;

use anyhow::{Result, ensure};

use crate::{
    control_block::inquiry::InquiryResponse,
    target::{
        device::{BlockDevice, BlockDeviceInfo},
        transport::Transport,
    },
};

/// Everything a started target works against. The caller owns all of it;
/// the target only borrows it between `start` and `stop`.
pub struct TargetConfig<'a> {
    pub(crate) device: &'a mut dyn BlockDevice,
    pub(crate) transport: &'a mut dyn Transport,
    /// One block of scratch space, reused by every block transfer.
    pub(crate) scratch: &'a mut [u8],
    pub(crate) inquiry: &'a InquiryResponse,
}

impl<'a> TargetConfig<'a> {
    /// Bundle the collaborators of a target. The scratch buffer must be
    /// exactly one block of `device`.
    pub fn new(
        device: &'a mut dyn BlockDevice,
        transport: &'a mut dyn Transport,
        scratch: &'a mut [u8],
        inquiry: &'a InquiryResponse,
    ) -> Result<Self> {
        let info = device.info();
        ensure!(info.block_size > 0, "block device reports a zero block size");
        ensure!(
            scratch.len() == info.block_size as usize,
            "scratch buffer is {} bytes, device block size is {}",
            scratch.len(),
            info.block_size
        );
        Ok(Self {
            device,
            transport,
            scratch,
            inquiry,
        })
    }

    #[inline]
    pub fn device_info(&self) -> BlockDeviceInfo {
        self.device.info()
    }

    #[inline]
    pub fn inquiry(&self) -> &'a InquiryResponse {
        self.inquiry
    }
}

impl fmt::Debug for TargetConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("device", &self.device.info())
            .field("scratch_len", &self.scratch.len())
            .field("inquiry", &self.inquiry)
            .finish_non_exhaustive()
    }
}

/// Behaviour switches that are not part of the collaborator binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetOptions {
    /// Check the result of every per-block device call and transport
    /// transfer in READ(10)/WRITE(10). When false the loop ignores them and
    /// always completes with SUCCESS.
    pub check_block_io: bool,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            check_block_io: true,
        }
    }
}
