// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    control_block::mod_sense::ModeSense6Response,
    target::{ScsiTarget, dispatch::HandlerResult},
};

/// MODE SENSE(6): a bare 4-byte mode parameter header, WP reflecting the
/// device. Page code, page control and DBD are ignored.
pub fn handle(target: &mut ScsiTarget<'_>, _cdb: &[u8]) -> HandlerResult {
    let info = target.device_info()?;
    let header = ModeSense6Response::for_device(info.write_protected);
    target.transmit(&header.to_bytes())
}
