// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Big-endian accessors for the multi-byte fields carried in CDBs and
//! parameter data.
//!
//! SCSI puts every multi-byte field on the wire MSB first. These helpers
//! read and write such fields at a fixed offset of a byte slice and never
//! depend on the host byte order or on struct layout.

use anyhow::{Result, anyhow};

#[inline]
fn window<const N: usize>(buf: &[u8], off: usize) -> Result<[u8; N]> {
    buf.get(off..off + N)
        .and_then(|s| <[u8; N]>::try_from(s).ok())
        .ok_or_else(|| {
            anyhow!(
                "need {N} bytes at offset {off}, buffer holds {}",
                buf.len()
            )
        })
}

#[inline]
fn window_mut<const N: usize>(buf: &mut [u8], off: usize) -> Result<&mut [u8]> {
    let len = buf.len();
    buf.get_mut(off..off + N)
        .ok_or_else(|| anyhow!("need {N} bytes at offset {off}, buffer holds {len}"))
}

/// Read a big-endian `u16` starting at `off`.
#[inline]
pub fn get_be16(buf: &[u8], off: usize) -> Result<u16> {
    window::<2>(buf, off).map(u16::from_be_bytes)
}

/// Read a big-endian `u32` starting at `off`.
#[inline]
pub fn get_be32(buf: &[u8], off: usize) -> Result<u32> {
    window::<4>(buf, off).map(u32::from_be_bytes)
}

#[inline]
pub fn put_be16(buf: &mut [u8], off: usize, value: u16) -> Result<()> {
    window_mut::<2>(buf, off)?.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

#[inline]
pub fn put_be32(buf: &mut [u8], off: usize, value: u32) -> Result<()> {
    window_mut::<4>(buf, off)?.copy_from_slice(&value.to_be_bytes());
    Ok(())
}
