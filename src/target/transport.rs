// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Byte channel to the initiator, e.g. the data stage of a USB bulk-only
/// transport.
///
/// Both calls block until the transfer finishes and return the number of
/// bytes actually moved, which may be less than requested.
pub trait Transport {
    fn transmit(&mut self, data: &[u8]) -> usize;

    fn receive(&mut self, buf: &mut [u8]) -> usize;
}
