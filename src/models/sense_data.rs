// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

use anyhow::{Result, bail};

use crate::models::asc_ascq::asc_ascq_to_str;

/// Fixed-format sense data is always 18 bytes on this target.
pub const FIXED_SENSE_LEN: usize = 18;

/// Response code for fixed-format, current-error sense data.
pub const RESPONSE_CODE_FIXED_CURRENT: u8 = 0x70;
/// Response code for fixed-format, deferred-error sense data.
pub const RESPONSE_CODE_FIXED_DEFERRED: u8 = 0x71;

/// Value written into byte 7 (ADDITIONAL SENSE LENGTH).
pub const ADDITIONAL_SENSE_LEN: u8 = 8;

const KEY_OFFSET: usize = 2;
const ADDITIONAL_LEN_OFFSET: usize = 7;
const ASC_OFFSET: usize = 12;
const ASCQ_OFFSET: usize = 13;

/// Sense keys (SPC-4 Table 47). `NoSense` doubles as "good".
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenseKey {
    NoSense = 0x00,
    RecoveredError = 0x01,
    NotReady = 0x02,
    MediumError = 0x03,
    HardwareError = 0x04,
    IllegalRequest = 0x05,
    UnitAttention = 0x06,
    DataProtect = 0x07,
    AbortedCommand = 0x0B,
}

impl SenseKey {
    pub const GOOD: SenseKey = SenseKey::NoSense;

    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v & 0x0F {
            0x00 => Self::NoSense,
            0x01 => Self::RecoveredError,
            0x02 => Self::NotReady,
            0x03 => Self::MediumError,
            0x04 => Self::HardwareError,
            0x05 => Self::IllegalRequest,
            0x06 => Self::UnitAttention,
            0x07 => Self::DataProtect,
            0x0B => Self::AbortedCommand,
            _ => return None,
        })
    }
}

/// Additional sense codes used by the target.
pub mod asc {
    pub const NO_ADDITIONAL_INFORMATION: u8 = 0x00;
    pub const WRITE_ERROR: u8 = 0x0C;
    pub const UNRECOVERED_READ_ERROR: u8 = 0x11;
    pub const INVALID_COMMAND: u8 = 0x20;
    pub const LBA_OUT_OF_RANGE: u8 = 0x21;
    pub const INVALID_FIELD_IN_CDB: u8 = 0x24;
    pub const WRITE_PROTECTED: u8 = 0x27;
    pub const MEDIUM_NOT_PRESENT: u8 = 0x3A;
}

/// Additional sense code qualifiers used by the target.
pub mod ascq {
    pub const NO_QUALIFIER: u8 = 0x00;
}

/// A (sense key, ASC, ASCQ) triple: everything the target ever reports about
/// a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenseCondition {
    pub key: SenseKey,
    pub asc: u8,
    pub ascq: u8,
}

impl SenseCondition {
    pub const OK: Self = Self::new(
        SenseKey::GOOD,
        asc::NO_ADDITIONAL_INFORMATION,
        ascq::NO_QUALIFIER,
    );
    pub const INVALID_COMMAND: Self = Self::new(
        SenseKey::IllegalRequest,
        asc::INVALID_COMMAND,
        ascq::NO_QUALIFIER,
    );
    pub const INVALID_FIELD_IN_CDB: Self = Self::new(
        SenseKey::IllegalRequest,
        asc::INVALID_FIELD_IN_CDB,
        ascq::NO_QUALIFIER,
    );
    pub const LBA_OUT_OF_RANGE: Self = Self::new(
        SenseKey::IllegalRequest,
        asc::LBA_OUT_OF_RANGE,
        ascq::NO_QUALIFIER,
    );
    pub const MEDIUM_NOT_PRESENT: Self = Self::new(
        SenseKey::NotReady,
        asc::MEDIUM_NOT_PRESENT,
        ascq::NO_QUALIFIER,
    );
    pub const UNRECOVERED_READ_ERROR: Self = Self::new(
        SenseKey::MediumError,
        asc::UNRECOVERED_READ_ERROR,
        ascq::NO_QUALIFIER,
    );
    pub const WRITE_ERROR: Self =
        Self::new(SenseKey::MediumError, asc::WRITE_ERROR, ascq::NO_QUALIFIER);
    pub const WRITE_PROTECTED: Self = Self::new(
        SenseKey::DataProtect,
        asc::WRITE_PROTECTED,
        ascq::NO_QUALIFIER,
    );

    pub const fn new(key: SenseKey, asc: u8, ascq: u8) -> Self {
        Self { key, asc, ascq }
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        asc_ascq_to_str(self.asc, self.ascq)
    }
}

impl fmt::Display for SenseCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:02X}h/{:02X}h ({})",
            self.key,
            self.asc,
            self.ascq,
            self.description()
        )
    }
}

/// SPC-4 Table 48: fixed format sense data, as kept by the target and sent
/// verbatim in response to REQUEST SENSE.
///
/// | byte  | field                            |
/// |-------|----------------------------------|
/// | 0     | RESPONSE CODE (0x70)             |
/// | 2     | SENSE KEY (low nibble)           |
/// | 7     | ADDITIONAL SENSE LENGTH (8)      |
/// | 12    | ADDITIONAL SENSE CODE            |
/// | 13    | ADDITIONAL SENSE CODE QUALIFIER  |
///
/// All other bytes stay zero.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SenseRecord {
    bytes: [u8; FIXED_SENSE_LEN],
}

impl Default for SenseRecord {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl SenseRecord {
    /// The all-zero record a freshly initialised target holds.
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0u8; FIXED_SENSE_LEN],
        }
    }

    /// Build a complete record for `cond`; nothing from a previous record
    /// survives.
    pub fn from_condition(cond: SenseCondition) -> Self {
        let mut bytes = [0u8; FIXED_SENSE_LEN];
        bytes[0] = RESPONSE_CODE_FIXED_CURRENT;
        bytes[KEY_OFFSET] = cond.key as u8;
        bytes[ADDITIONAL_LEN_OFFSET] = ADDITIONAL_SENSE_LEN;
        bytes[ASC_OFFSET] = cond.asc;
        bytes[ASCQ_OFFSET] = cond.ascq;
        Self { bytes }
    }

    /// Parse *fixed-format* sense data (SPC-4 § 4.5.3) as sent by a target.
    ///
    /// The buffer must be at least 18 bytes long.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let Some(head) = buf.get(..FIXED_SENSE_LEN) else {
            bail!(
                "sense buffer too small: {} < {FIXED_SENSE_LEN}",
                buf.len()
            );
        };
        let response_code = head[0] & 0x7F;
        if response_code != RESPONSE_CODE_FIXED_CURRENT
            && response_code != RESPONSE_CODE_FIXED_DEFERRED
        {
            bail!("not fixed-format sense data: response code {response_code:#04x}");
        }
        let mut bytes = [0u8; FIXED_SENSE_LEN];
        bytes.copy_from_slice(head);
        Ok(Self { bytes })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; FIXED_SENSE_LEN] {
        &self.bytes
    }

    #[inline]
    pub fn response_code(&self) -> u8 {
        self.bytes[0] & 0x7F
    }

    #[inline]
    pub fn sense_key(&self) -> u8 {
        self.bytes[KEY_OFFSET] & 0x0F
    }

    #[inline]
    pub fn additional_len(&self) -> u8 {
        self.bytes[ADDITIONAL_LEN_OFFSET]
    }

    #[inline]
    pub fn asc(&self) -> u8 {
        self.bytes[ASC_OFFSET]
    }

    #[inline]
    pub fn ascq(&self) -> u8 {
        self.bytes[ASCQ_OFFSET]
    }

    /// The triple this record carries; `None` while the record is still
    /// all-zero or holds a key the target never sets.
    pub fn condition(&self) -> Option<SenseCondition> {
        if self.response_code() == 0 {
            return None;
        }
        SenseKey::from_u8(self.sense_key())
            .map(|key| SenseCondition::new(key, self.asc(), self.ascq()))
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.condition() == Some(SenseCondition::OK)
    }
}

impl fmt::Debug for SenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenseRecord")
            .field(
                "response_code",
                &format_args!("{:#04x}", self.response_code()),
            )
            .field("sense_key", &format_args!("{:#x}", self.sense_key()))
            .field("additional_len", &self.additional_len())
            .field("asc", &format_args!("{:#04x}", self.asc()))
            .field("ascq", &format_args!("{:#04x}", self.ascq()))
            .field("description", &asc_ascq_to_str(self.asc(), self.ascq()))
            .finish()
    }
}
