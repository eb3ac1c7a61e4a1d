// SPDX-License-Identifier: AGPL-3.0-or-later GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub const TEST_UNIT_READY: u8 = 0x00;
pub const PREVENT_ALLOW_MEDIUM_REMOVAL: u8 = 0x1E;

/// Build a standard TEST UNIT READY CDB.
#[inline]
pub fn build_test_unit_ready(cdb: &mut [u8; 16], control: u8) {
    cdb.fill(0);
    cdb[0] = TEST_UNIT_READY;
    cdb[5] = control;
}

/// Build a PREVENT ALLOW MEDIUM REMOVAL CDB. `prevent` lands in bits 1..0 of
/// byte 4 (0 = allow, 1 = prevent).
#[inline]
pub fn build_prevent_allow_medium_removal(cdb: &mut [u8; 16], prevent: u8, control: u8) {
    cdb.fill(0);
    cdb[0] = PREVENT_ALLOW_MEDIUM_REMOVAL;
    cdb[4] = prevent & 0b11;
    cdb[5] = control;
}
