// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{
    control_block::common::{DataRequest, WRITE_10},
    models::sense_data::SenseCondition,
    target::{
        CommandStatus, ScsiTarget,
        device::BlockDeviceError,
        dispatch::HandlerResult,
        transfer::{DataTransferEngine, Direction, TransferOutcome},
    },
};

/// READ(10) / WRITE(10).
///
/// The whole range is checked against the medium before the device or the
/// transport is touched; blocks then move one at a time through the scratch
/// buffer.
pub fn handle(target: &mut ScsiTarget<'_>, cdb: &[u8]) -> HandlerResult {
    let req = DataRequest::decode(cdb).map_err(|_| SenseCondition::INVALID_FIELD_IN_CDB)?;
    let dir = match cdb.first() {
        Some(&WRITE_10) => Direction::Write,
        _ => Direction::Read,
    };

    let info = target.device_info()?;
    if !req.fits_within(info.block_count) {
        debug!(
            lba = req.first_lba,
            count = req.block_count,
            blocks = info.block_count,
            "request runs past end of medium"
        );
        return Err(SenseCondition::LBA_OUT_OF_RANGE);
    }
    if req.block_count == 0 {
        return Ok(CommandStatus::Success);
    }

    let checked = target.options().check_block_io;
    let outcome = DataTransferEngine::new(target.config_mut()?, checked).run(&req, dir);

    match outcome {
        TransferOutcome::Complete => Ok(CommandStatus::Success),
        TransferOutcome::Short { residue } => {
            target.set_residue(residue);
            Ok(CommandStatus::Failed)
        },
        TransferOutcome::Device(e) => Err(device_condition(dir, e)),
    }
}

fn device_condition(dir: Direction, e: BlockDeviceError) -> SenseCondition {
    match (dir, e) {
        (Direction::Write, BlockDeviceError::WriteProtected) => SenseCondition::WRITE_PROTECTED,
        (Direction::Write, _) => SenseCondition::WRITE_ERROR,
        (Direction::Read, _) => SenseCondition::UNRECOVERED_READ_ERROR,
    }
}
