// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Copies `s` into `buf` left-aligned and pads the rest with ASCII spaces, as
/// SCSI expects for fixed-width identification fields. Non-ASCII and control
/// characters become `?`; anything past the field width is dropped.
pub fn fill_left_aligned_ascii(buf: &mut [u8], s: &str) {
    buf.fill(b' ');
    for (dst, ch) in buf.iter_mut().zip(s.chars()) {
        *dst = if ch.is_ascii_graphic() || ch == ' ' {
            ch as u8
        } else {
            b'?'
        };
    }
}

/// Short hex rendering of a command block for log lines.
pub fn cdb_hex(cdb: &[u8]) -> String {
    let len = cdb.len().min(16);
    hex::encode(&cdb[..len])
}
