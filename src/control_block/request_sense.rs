// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! REQUEST SENSE: 6-byte CDB filler written into a provided 16-byte buffer,
//! plus the target-side view of the same CDB.
//!
//! CDB layout (SPC):
//!   [0] = 0x03 (REQUEST SENSE)
//!   [1] = DESC (bit 0), other bits reserved=0
//!   [2]..[3] = reserved (0)
//!   [4] = ALLOCATION LENGTH (number of bytes to return)
//!   [5] = CONTROL
//!
//! Notes:
//! - This target only produces fixed-format sense data and only accepts an
//!   allocation length of exactly 18, so `desc=true` is refused.

use anyhow::{Result, bail};

use crate::models::sense_data::FIXED_SENSE_LEN;

pub const REQUEST_SENSE: u8 = 0x03;

/// Fill a REQUEST SENSE (6) CDB into `cdb[0..6]`.
#[inline]
pub fn fill_request_sense(cdb: &mut [u8; 16], desc: bool, allocation_len: u8, control: u8) {
    cdb.fill(0);
    cdb[0] = REQUEST_SENSE;
    cdb[1] = (desc as u8) & 0x01;
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Convenience: DESC=0, allocation length 18, CONTROL=0.
#[inline]
pub fn fill_request_sense_simple(cdb: &mut [u8; 16]) {
    fill_request_sense(cdb, false, FIXED_SENSE_LEN as u8, 0x00)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSenseCdb {
    /// Bytes 1..=3: DESC plus the reserved bytes.
    pub reserved: [u8; 3],
    pub allocation_len: u8,
}

impl RequestSenseCdb {
    pub fn decode(cdb: &[u8]) -> Result<Self> {
        if cdb.len() < 6 {
            bail!("REQUEST SENSE CDB too short: {}", cdb.len());
        }
        Ok(Self {
            reserved: [cdb[1], cdb[2], cdb[3]],
            allocation_len: cdb[4],
        })
    }

    /// The only shape served: reserved bytes clear and room for exactly one
    /// fixed-format record.
    #[inline]
    pub fn is_acceptable(&self) -> bool {
        self.reserved == [0; 3] && usize::from(self.allocation_len) == FIXED_SENSE_LEN
    }
}
