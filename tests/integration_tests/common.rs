// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::PathBuf;

use anyhow::{Context, Result};
use scsi_target_rs::{
    backend::{LoopbackTransport, MemBlockDevice},
    cfg::config::Config,
    control_block::{
        common::{build_read10, build_write10},
        request_sense::fill_request_sense_simple,
    },
    models::sense_data::SenseRecord,
    target::{CommandStatus, ScsiTarget, TargetConfig, TargetOptions},
};

pub fn test_path() -> String {
    std::env::var("TEST_CONFIG").unwrap_or_else(|_| "tests/config.yaml".into())
}

pub fn load_config() -> Result<Config> {
    let path = test_path();
    let pb = PathBuf::from(path);
    let cfg = Config::load_from_file(&pb).with_context(|| format!("failed to load {:?}", pb))?;
    Ok(cfg)
}

/// What a started target borrows. Kept apart from the observer handles in
/// [`Rig`] so a test can inspect the disk and the wire while the target is
/// alive.
pub struct Bench {
    device: MemBlockDevice,
    transport: LoopbackTransport,
    scratch: Vec<u8>,
    inquiry: scsi_target_rs::control_block::inquiry::InquiryResponse,
    pub options: TargetOptions,
}

impl Bench {
    pub fn config(&mut self) -> Result<TargetConfig<'_>> {
        TargetConfig::new(
            &mut self.device,
            &mut self.transport,
            &mut self.scratch,
            &self.inquiry,
        )
    }

    /// A READY target bound to this bench.
    pub fn start(&mut self) -> Result<ScsiTarget<'_>> {
        let mut target = ScsiTarget::with_options(self.options);
        target.start(self.config()?);
        Ok(target)
    }
}

pub struct Rig {
    /// Observer handle onto the RAM disk.
    pub disk: MemBlockDevice,
    /// Observer handle onto the initiator side of the wire.
    pub wire: LoopbackTransport,
    pub bench: Bench,
}

impl Rig {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let disk = MemBlockDevice::from_info(cfg.device_info())?;
        disk.fill_pattern();
        let wire = LoopbackTransport::new();
        Ok(Self {
            bench: Bench {
                device: disk.clone(),
                transport: wire.clone(),
                scratch: vec![0u8; cfg.device.block_size as usize],
                inquiry: cfg.inquiry_response(),
                options: cfg.target_options(),
            },
            disk,
            wire,
        })
    }

    /// 1000 blocks of 512 bytes, as in `tests/config.yaml`.
    pub fn standard() -> Result<Self> {
        Self::from_config(&load_config()?)
    }
}

pub fn read10(lba: u32, blocks: u16) -> [u8; 10] {
    let mut cdb = [0u8; 16];
    build_read10(&mut cdb, lba, blocks, 0, 0);
    first10(&cdb)
}

pub fn write10(lba: u32, blocks: u16) -> [u8; 10] {
    let mut cdb = [0u8; 16];
    build_write10(&mut cdb, lba, blocks, 0, 0);
    first10(&cdb)
}

fn first10(cdb: &[u8; 16]) -> [u8; 10] {
    let mut out = [0u8; 10];
    out.copy_from_slice(&cdb[..10]);
    out
}

/// Issue REQUEST SENSE and decode what went over the wire.
pub fn request_sense(target: &mut ScsiTarget<'_>, wire: &LoopbackTransport) -> Result<SenseRecord> {
    let mut cdb = [0u8; 16];
    fill_request_sense_simple(&mut cdb);
    wire.take_sent();
    let status = target.execute(&cdb[..6]);
    anyhow::ensure!(status == CommandStatus::Success, "REQUEST SENSE failed");
    SenseRecord::parse(&wire.take_sent())
}
