// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Descriptions for the ASC/ASCQ pairs a direct-access target reports
//! (SPC-4 Annex D subset).

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One row of the ASC/ASCQ table; `code` is `asc << 8 | ascq`.
pub struct Entry {
    code: u16,
    desc: &'static str,
}

const fn e(asc: u8, ascq: u8, desc: &'static str) -> Entry {
    Entry {
        code: ((asc as u16) << 8) | ascq as u16,
        desc,
    }
}

static ASC_ASCQ: &[Entry] = &[
    e(0x00, 0x00, "No additional sense information"),
    e(0x04, 0x00, "Logical unit not ready, cause not reportable"),
    e(0x04, 0x01, "Logical unit is in process of becoming ready"),
    e(0x04, 0x02, "Logical unit not ready, initializing command required"),
    e(0x04, 0x04, "Logical unit not ready, format in progress"),
    e(0x0C, 0x00, "Write error"),
    e(0x0C, 0x02, "Write error – auto reallocation failed"),
    e(0x11, 0x00, "Unrecovered read error"),
    e(0x1A, 0x00, "Parameter list length error"),
    e(0x20, 0x00, "Invalid command operation code"),
    e(0x21, 0x00, "Logical block address out of range"),
    e(0x24, 0x00, "Invalid field in CDB"),
    e(0x25, 0x00, "Logical unit not supported"),
    e(0x26, 0x00, "Invalid field in parameter list"),
    e(0x27, 0x00, "Write protected"),
    e(0x28, 0x00, "Not ready to ready change, medium may have changed"),
    e(0x29, 0x00, "Power on, reset, or bus device reset occurred"),
    e(0x3A, 0x00, "Medium not present"),
    e(0x44, 0x00, "Internal target failure"),
    e(0x53, 0x02, "Medium removal prevented"),
];

static ASC_ASCQ_MAP: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| ASC_ASCQ.iter().map(|e| (e.code, e.desc)).collect());

impl Entry {
    /// Looks up the description for a given ASC/ASCQ pair.
    #[inline]
    pub fn lookup(asc: u8, ascq: u8) -> Option<&'static str> {
        let k = ((asc as u16) << 8) | (ascq as u16);
        ASC_ASCQ_MAP.get(&k).copied()
    }
}

/// Return the SPC-4 description for a given ASC/ASCQ pair, or
/// `"UNSPECIFIED / vendor specific"` for pairs outside the table.
#[inline]
pub fn asc_ascq_to_str(asc: u8, ascq: u8) -> &'static str {
    Entry::lookup(asc, ascq).unwrap_or("UNSPECIFIED / vendor specific")
}
