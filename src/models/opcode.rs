// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! SCSI operation codes served by the target, and the CDB length implied by
//! an opcode's group code.
//!
//! ```text
//!  7   6   5   4   3   2   1   0      bit position
//! +-----------+-------------------+
//! |   GROUP   |   COMMAND CODE    |  ← CDB byte 0
//! +-----------+-------------------+
//! ```
//!
//! * **GROUP** 0 → 6-byte CDB, 1 and 2 → 10-byte, 4 → 16-byte, 5 → 12-byte.
//!   Groups 3, 6 and 7 are reserved or vendor specific.

use core::fmt;
use std::convert::TryFrom;

use thiserror::Error;

/// Shift that moves the group code into the low bits.
const GROUP_SHIFT: u8 = 5;

/// Operation codes with a handler in the standard command table.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScsiOpcode {
    TestUnitReady = 0x00,
    RequestSense = 0x03,
    Inquiry = 0x12,
    ModeSense6 = 0x1A,
    PreventAllowMediumRemoval = 0x1E,
    ReadCapacity10 = 0x25,
    Read10 = 0x28,
    Write10 = 0x2A,
}

impl ScsiOpcode {
    pub const ALL: [ScsiOpcode; 8] = [
        Self::TestUnitReady,
        Self::RequestSense,
        Self::Inquiry,
        Self::ModeSense6,
        Self::PreventAllowMediumRemoval,
        Self::ReadCapacity10,
        Self::Read10,
        Self::Write10,
    ];

    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0x00 => Self::TestUnitReady,
            0x03 => Self::RequestSense,
            0x12 => Self::Inquiry,
            0x1A => Self::ModeSense6,
            0x1E => Self::PreventAllowMediumRemoval,
            0x25 => Self::ReadCapacity10,
            0x28 => Self::Read10,
            0x2A => Self::Write10,
            _ => return None,
        })
    }

    /// Human-readable command name, as used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TestUnitReady => "TEST UNIT READY",
            Self::RequestSense => "REQUEST SENSE",
            Self::Inquiry => "INQUIRY",
            Self::ModeSense6 => "MODE SENSE(6)",
            Self::PreventAllowMediumRemoval => "PREVENT/ALLOW MEDIUM REMOVAL",
            Self::ReadCapacity10 => "READ CAPACITY(10)",
            Self::Read10 => "READ(10)",
            Self::Write10 => "WRITE(10)",
        }
    }

    /// CDB length fixed by the opcode's group code.
    #[inline]
    pub const fn cdb_len(self) -> usize {
        match cdb_len_for(self as u8) {
            Some(len) => len,
            None => 6,
        }
    }
}

impl From<ScsiOpcode> for u8 {
    #[inline]
    fn from(op: ScsiOpcode) -> u8 {
        op as u8
    }
}

/// Returned when byte 0 of a CDB names no supported command.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unsupported SCSI opcode: 0x{0:02x}")]
pub struct UnknownOpcode(pub u8);

impl TryFrom<u8> for ScsiOpcode {
    type Error = UnknownOpcode;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        ScsiOpcode::from_u8(byte).ok_or(UnknownOpcode(byte))
    }
}

impl fmt::Display for ScsiOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02x})", self.name(), *self as u8)
    }
}

/// CDB length implied by the group code of `opcode`, `None` for the reserved
/// and vendor-specific groups.
#[inline]
pub const fn cdb_len_for(opcode: u8) -> Option<usize> {
    match opcode >> GROUP_SHIFT {
        0 => Some(6),
        1 | 2 => Some(10),
        4 => Some(16),
        5 => Some(12),
        _ => None,
    }
}
