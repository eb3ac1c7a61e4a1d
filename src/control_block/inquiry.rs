// SPDX-License-Identifier: AGPL-3.0-or-later GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! INQUIRY (6): CDB fillers, CDB decoding on the target side and the
//! 36-byte standard INQUIRY data the target answers with.
//!
//! CDB layout (SPC):
//!   [0] = 0x12 (INQUIRY)
//!   [1] = EVPD (bit 0), CMDDT (bit 1, obsolete); other bits reserved
//!   [2] = Page Code (only when EVPD=1; else 0)
//!   [3..4] = Allocation Length (SPC-4 widened it to 16 bits)
//!   [5] = Control

use anyhow::{Result, anyhow, bail};
use bitflags::bitflags;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

pub const INQUIRY_OPCODE: u8 = 0x12;

/// Size of the standard INQUIRY data served by the target.
pub const INQUIRY_RESPONSE_LEN: usize = 36;

bitflags! {
    /// Byte 1 of the INQUIRY CDB.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InquiryFlags: u8 {
        /// Enable Vital Product Data.
        const EVPD  = 0b0000_0001;
        /// Command support data (obsolete, must be zero).
        const CMDDT = 0b0000_0010;
    }
}

/// Common VPD page codes (subset).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VpdPage {
    SupportedPages = 0x00,
    UnitSerial = 0x80,
    DeviceId = 0x83,
    BlockLimits = 0xB0,
}

impl From<VpdPage> for u8 {
    #[inline]
    fn from(p: VpdPage) -> u8 {
        p as u8
    }
}

/// Fill a **Standard INQUIRY (EVPD=0)** CDB.
#[inline]
pub fn fill_inquiry_standard(cdb: &mut [u8; 16], allocation_len: u8, control: u8) {
    cdb.fill(0);
    cdb[0] = INQUIRY_OPCODE;
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Convenience: Standard INQUIRY asking for the full 36 bytes, control=0.
#[inline]
pub fn fill_inquiry_standard_simple(cdb: &mut [u8; 16]) {
    fill_inquiry_standard(cdb, INQUIRY_RESPONSE_LEN as u8, 0x00)
}

/// Fill a **VPD INQUIRY (EVPD=1)** CDB. The target rejects these; hosts
/// still send them while probing.
#[inline]
pub fn fill_inquiry_vpd(cdb: &mut [u8; 16], page: VpdPage, allocation_len: u8, control: u8) {
    cdb.fill(0);
    cdb[0] = INQUIRY_OPCODE;
    cdb[1] = InquiryFlags::EVPD.bits();
    cdb[2] = page.into();
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Decoded INQUIRY CDB fields the target looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryCdb {
    pub flags: InquiryFlags,
    pub page_code: u8,
    pub allocation_len: u16,
}

impl InquiryCdb {
    pub fn decode(cdb: &[u8]) -> Result<Self> {
        if cdb.len() < 6 {
            bail!("INQUIRY CDB too short: {}", cdb.len());
        }
        Ok(Self {
            flags: InquiryFlags::from_bits_retain(cdb[1]),
            page_code: cdb[2],
            allocation_len: u16::from_be_bytes([cdb[3], cdb[4]]),
        })
    }

    /// True for a plain standard-data request: EVPD and CMDDT clear, page
    /// code zero.
    #[inline]
    pub fn is_standard(&self) -> bool {
        !self
            .flags
            .intersects(InquiryFlags::EVPD | InquiryFlags::CMDDT)
            && self.page_code == 0
    }
}

/// Standard INQUIRY data (SPC-4 § 6.4.2), first 36 bytes.
///
/// Every field is a byte or a byte array, so the in-memory layout is the wire
/// layout and [`IntoBytes::as_bytes`] yields the response directly.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct InquiryResponse {
    /// PERIPHERAL QUALIFIER (bits 7..5) | DEVICE TYPE (bits 4..0)
    pub peripheral: u8,
    /// RMB in bit 7
    pub removable: u8,
    pub version: u8,
    /// RESPONSE DATA FORMAT in the low nibble
    pub response_format: u8,
    /// n - 4
    pub additional_length: u8,
    pub flags: [u8; 3],
    pub vendor_id: [u8; 8],
    pub product_id: [u8; 16],
    pub product_rev: [u8; 4],
}

impl InquiryResponse {
    pub const DEVICE_TYPE_DIRECT_ACCESS: u8 = 0x00;
    /// SPC-4
    pub const VERSION_SPC4: u8 = 0x06;
    pub const RESPONSE_FORMAT: u8 = 0x02;
    const RMB: u8 = 0x80;

    /// Build a direct-access block device template. The identity strings are
    /// space-padded and truncated to their field widths.
    pub fn direct_access(vendor: &str, product: &str, revision: &str, removable: bool) -> Self {
        let mut out = Self {
            peripheral: Self::DEVICE_TYPE_DIRECT_ACCESS,
            removable: if removable { Self::RMB } else { 0 },
            version: Self::VERSION_SPC4,
            response_format: Self::RESPONSE_FORMAT,
            additional_length: (INQUIRY_RESPONSE_LEN - 5) as u8,
            flags: [0; 3],
            vendor_id: [b' '; 8],
            product_id: [b' '; 16],
            product_rev: [b' '; 4],
        };
        crate::utils::fill_left_aligned_ascii(&mut out.vendor_id, vendor);
        crate::utils::fill_left_aligned_ascii(&mut out.product_id, product);
        crate::utils::fill_left_aligned_ascii(&mut out.product_rev, revision);
        out
    }

    #[inline]
    pub fn is_removable(&self) -> bool {
        self.removable & Self::RMB != 0
    }

    /// Copy a template out of raw bytes (e.g. a table baked into flash).
    pub fn from_wire(buf: &[u8]) -> Result<Self> {
        Self::read_from_prefix(buf)
            .map(|(resp, _rest)| resp)
            .map_err(|_| anyhow!("INQUIRY template: need ≥ 36 bytes, got {}", buf.len()))
    }
}

/// Parsed view of standard INQUIRY data, as a host would see it.
#[derive(Debug, Clone)]
pub struct InquiryStandard {
    pub peripheral_qualifier: u8, // bits 7..5 of byte0
    pub device_type: u8,          // bits 4..0 of byte0
    pub rmb: bool,                // byte1 bit7
    pub version: u8,              // byte2
    pub response_data_format: u8, // byte3 low nibble
    pub additional_length: u8,    // byte4
    pub vendor_id: String,        // bytes 8..16
    pub product_id: String,       // bytes 16..32
    pub product_rev: String,      // bytes 32..36
}

/// Parse a Standard INQUIRY (EVPD=0) response (minimum 36 bytes).
pub fn parse_inquiry_standard(buf: &[u8]) -> Result<InquiryStandard> {
    if buf.len() < INQUIRY_RESPONSE_LEN {
        bail!("INQUIRY buffer too short: {}", buf.len());
    }
    let b0 = buf[0];

    Ok(InquiryStandard {
        peripheral_qualifier: (b0 >> 5) & 0x07,
        device_type: b0 & 0x1F,
        rmb: (buf[1] & 0x80) != 0,
        version: buf[2],
        response_data_format: buf[3] & 0x0F,
        additional_length: buf[4],
        vendor_id: trim_ascii(&buf[8..16]),
        product_id: trim_ascii(&buf[16..32]),
        product_rev: trim_ascii(&buf[32..36]),
    })
}

fn trim_ascii(bytes: &[u8]) -> String {
    let s: String = bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect();
    s.trim().to_string()
}
