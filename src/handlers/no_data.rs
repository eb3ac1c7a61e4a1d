// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::target::{CommandStatus, ScsiTarget, dispatch::HandlerResult};

/// TEST UNIT READY and PREVENT ALLOW MEDIUM REMOVAL: always good.
pub fn handle(target: &mut ScsiTarget<'_>, _cdb: &[u8]) -> HandlerResult {
    target.set_sense_ok();
    Ok(CommandStatus::Success)
}
