// src/control_block/mod_sense.rs
// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! MODE SENSE(6): CDB filler and the 4-byte mode parameter header the
//! target answers with.

use anyhow::{Result, bail};
use bitflags::bitflags;

pub const MODE_SENSE_6: u8 = 0x1A;

/// Size of the mode parameter header sent back (no block descriptors, no
/// pages).
pub const MODE_SENSE_6_LEN: usize = 4;

/// Page Control (PC) for MODE SENSE byte 2 (bits 7..6).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PageControl {
    Current = 0b00,
    Changeable = 0b01,
    Default = 0b10,
    Saved = 0b11,
}

/// Page code asking for every page.
pub const ALL_PAGES: u8 = 0x3F;

#[inline]
fn pc_bits(pc: PageControl) -> u8 {
    (pc as u8) << 6
}

/// Fill a MODE SENSE(6) CDB into `cdb[0..6]`.
/// Layout:
///   [0]=0x1A, [1]=DBD<<3, [2]=PC(7..6)|PAGE(5..0), [3]=SUBPAGE, [4]=ALLOC_LEN,
/// [5]=CONTROL
#[inline]
pub fn fill_mode_sense6(
    cdb: &mut [u8; 16],
    dbd: bool,
    pc: PageControl,
    page_code: u8,
    subpage_code: u8,
    allocation_len: u8,
    control: u8,
) {
    cdb.fill(0);
    cdb[0] = MODE_SENSE_6;
    cdb[1] = ((dbd as u8) << 3) & 0b0000_1000;
    cdb[2] = pc_bits(pc) | (page_code & 0x3F);
    cdb[3] = subpage_code;
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Convenience: what hosts typically send first: all pages, PC=Current,
/// DBD=1, subpage=0, control=0.
#[inline]
pub fn fill_mode_sense6_simple(cdb: &mut [u8; 16], allocation_len: u8) {
    fill_mode_sense6(
        cdb,
        true,
        PageControl::Current,
        ALL_PAGES,
        0x00,
        allocation_len,
        0x00,
    )
}

bitflags! {
    /// DEVICE-SPECIFIC PARAMETER byte for direct-access devices (SBC).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DeviceSpecific: u8 {
        /// Medium is write-protected.
        const WP = 0b1000_0000;
    }
}

/// Mode parameter header (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSense6Response {
    /// Bytes following this field: header size - 1.
    pub mode_data_length: u8,
    pub medium_type: u8,
    pub device_specific: DeviceSpecific,
    pub block_descriptor_length: u8,
}

impl ModeSense6Response {
    pub fn for_device(write_protected: bool) -> Self {
        let mut device_specific = DeviceSpecific::empty();
        device_specific.set(DeviceSpecific::WP, write_protected);
        Self {
            mode_data_length: (MODE_SENSE_6_LEN - 1) as u8,
            medium_type: 0,
            device_specific,
            block_descriptor_length: 0,
        }
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; MODE_SENSE_6_LEN] {
        [
            self.mode_data_length,
            self.medium_type,
            self.device_specific.bits(),
            self.block_descriptor_length,
        ]
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        let Some(&[len, medium, dsp, bdl]) = buf.first_chunk::<MODE_SENSE_6_LEN>() else {
            bail!("MODE SENSE(6): need ≥ 4 bytes, got {}", buf.len());
        };
        Ok(Self {
            mode_data_length: len,
            medium_type: medium,
            device_specific: DeviceSpecific::from_bits_retain(dsp),
            block_descriptor_length: bdl,
        })
    }

    #[inline]
    pub fn write_protected(&self) -> bool {
        self.device_specific.contains(DeviceSpecific::WP)
    }
}
