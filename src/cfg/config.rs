// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{
    cfg::enums::YesNo,
    control_block::inquiry::InquiryResponse,
    target::{config::TargetOptions, device::BlockDeviceInfo},
};

const VENDOR_ID_LEN: usize = 8;
const PRODUCT_ID_LEN: usize = 16;
const PRODUCT_REV_LEN: usize = 4;
const MIN_BLOCK_SIZE: u32 = 512;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// What the target tells an initiator about itself.
    pub target: TargetIdentity,
    /// Geometry of the RAM disk used by the demo and the test rigs.
    pub device: DeviceConfig,
    /// Implementation/runtime switches that are not visible on the wire.
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TargetIdentity {
    #[serde(rename = "Inquiry")]
    pub inquiry: InquiryIdentity,
}

/// Identification strings served in standard INQUIRY data.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InquiryIdentity {
    #[serde(rename = "VendorId")]
    /// T10 vendor identification (≤ 8 ASCII characters).
    pub vendor_id: String,

    #[serde(rename = "ProductId")]
    /// Product identification (≤ 16 ASCII characters).
    pub product_id: String,

    #[serde(rename = "ProductRevision")]
    /// Product revision level (≤ 4 ASCII characters).
    pub product_revision: String,

    #[serde(rename = "Removable", default = "default_yes")]
    /// RMB bit.
    pub removable: YesNo,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DeviceConfig {
    #[serde(rename = "BlockSize")]
    pub block_size: u32,

    #[serde(rename = "BlockCount")]
    pub block_count: u32,

    #[serde(rename = "WriteProtected", default = "default_no")]
    pub write_protected: YesNo,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RuntimeConfig {
    #[serde(rename = "CheckBlockIo", default = "default_yes")]
    /// Stop READ(10)/WRITE(10) at the first failed block call (Yes), or
    /// ignore per-block results (No).
    pub check_block_io: YesNo,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            check_block_io: YesNo::Yes,
        }
    }
}

fn default_yes() -> YesNo {
    YesNo::Yes
}

fn default_no() -> YesNo {
    YesNo::No
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {path:?}"))?;
        Self::from_yaml_str(&s)
    }

    /// Same as [`Config::load_from_file`] for an in-memory document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let mut cfg: Config =
            serde_yaml::from_str(s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants and normalizes derived fields.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        let inq = &mut self.target.inquiry;
        for s in [
            &mut inq.vendor_id,
            &mut inq.product_id,
            &mut inq.product_revision,
        ] {
            let trimmed = s.trim_end();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }

        ensure!(!inq.vendor_id.is_empty(), "VendorId must not be empty");
        for (name, value, max) in [
            ("VendorId", &inq.vendor_id, VENDOR_ID_LEN),
            ("ProductId", &inq.product_id, PRODUCT_ID_LEN),
            ("ProductRevision", &inq.product_revision, PRODUCT_REV_LEN),
        ] {
            ensure!(
                value.is_ascii(),
                "{name} must be ASCII, got {value:?}"
            );
            ensure!(
                value.len() <= max,
                "{name} is {} characters, at most {max} allowed",
                value.len()
            );
        }

        let dev = &self.device;
        ensure!(
            dev.block_size >= MIN_BLOCK_SIZE && dev.block_size % MIN_BLOCK_SIZE == 0,
            "BlockSize must be a nonzero multiple of {MIN_BLOCK_SIZE}, got {}",
            dev.block_size
        );
        ensure!(dev.block_count >= 1, "BlockCount must be >= 1");

        Ok(())
    }

    /// The 36-byte INQUIRY template described by `target.Inquiry`.
    pub fn inquiry_response(&self) -> InquiryResponse {
        let inq = &self.target.inquiry;
        InquiryResponse::direct_access(
            &inq.vendor_id,
            &inq.product_id,
            &inq.product_revision,
            inq.removable.as_bool(),
        )
    }

    pub fn device_info(&self) -> BlockDeviceInfo {
        BlockDeviceInfo {
            block_size: self.device.block_size,
            block_count: self.device.block_count,
            write_protected: self.device.write_protected.as_bool(),
        }
    }

    pub fn target_options(&self) -> TargetOptions {
        TargetOptions {
            check_block_io: self.runtime.check_block_io.as_bool(),
        }
    }
}
