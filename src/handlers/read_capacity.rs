// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    control_block::read_capacity::ReadCapacity10Response,
    target::{ScsiTarget, dispatch::HandlerResult},
};

/// READ CAPACITY(10): last LBA and block length, big-endian. LBA and PMI in
/// the CDB are ignored.
pub fn handle(target: &mut ScsiTarget<'_>, _cdb: &[u8]) -> HandlerResult {
    let info = target.device_info()?;
    let rsp = ReadCapacity10Response::new(info.block_size, info.block_count);
    target.transmit(&rsp.to_bytes())
}
