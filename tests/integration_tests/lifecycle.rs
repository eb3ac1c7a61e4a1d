// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use scsi_target_rs::{
    control_block::{
        inquiry::{VpdPage, fill_inquiry_vpd},
        read_capacity::build_read_capacity10,
        test_unit_ready::build_test_unit_ready,
    },
    models::sense_data::SenseCondition,
    target::{
        CommandStatus, HandlerEntry, HandlerResult, ScsiTarget, TargetState,
    },
};

use crate::integration_tests::common::{Rig, read10};

const SYNCHRONIZE_CACHE_10: u8 = 0x35;

fn synchronize_cache(target: &mut ScsiTarget<'_>, _cdb: &[u8]) -> HandlerResult {
    target.device_info()?;
    Ok(CommandStatus::Success)
}

#[test]
fn fresh_target_is_stopped_and_clean() {
    let target = ScsiTarget::new();
    assert_eq!(target.state(), TargetState::Stopped);
    assert_eq!(target.residue(), 0);
    assert_eq!(target.sense().as_bytes(), &[0u8; 18]);
    assert!(target.config().is_none());
    assert!(target.options().check_block_io);
}

#[test]
fn stopped_target_without_medium() {
    let mut target = ScsiTarget::new();
    let mut cdb = [0u8; 16];

    build_test_unit_ready(&mut cdb, 0);
    assert_eq!(target.execute(&cdb[..6]), CommandStatus::Success);

    assert_eq!(target.execute(&read10(0, 1)), CommandStatus::Failed);
    assert_eq!(
        target.sense().condition(),
        Some(SenseCondition::MEDIUM_NOT_PRESENT)
    );

    build_read_capacity10(&mut cdb, 0, false, 0);
    assert_eq!(target.execute(&cdb[..10]), CommandStatus::Failed);
    assert_eq!(
        target.sense().condition(),
        Some(SenseCondition::MEDIUM_NOT_PRESENT)
    );

    // CDB checks still come first
    fill_inquiry_vpd(&mut cdb, VpdPage::DeviceId, 0xFF, 0);
    assert_eq!(target.execute(&cdb[..6]), CommandStatus::Failed);
    assert_eq!(
        target.sense().condition(),
        Some(SenseCondition::INVALID_FIELD_IN_CDB)
    );

    assert_eq!(target.execute(&[0xEE; 10]), CommandStatus::Failed);
    assert_eq!(
        target.sense().condition(),
        Some(SenseCondition::INVALID_COMMAND)
    );
}

#[test]
fn start_stop_and_restart() -> Result<()> {
    let mut first = Rig::standard()?;
    let mut second = Rig::standard()?;

    let mut target = ScsiTarget::new();
    assert!(target.start(first.bench.config()?).is_none());
    assert_eq!(target.state(), TargetState::Ready);

    let previous = target.start(second.bench.config()?);
    assert!(previous.is_some(), "rebinding lost the old config");

    assert_eq!(target.execute(&read10(3, 1)), CommandStatus::Success);
    assert!(first.wire.sent().is_empty());
    assert_eq!(second.wire.take_sent().len(), 512);

    let released = target.stop();
    assert!(released.is_some());
    assert_eq!(target.state(), TargetState::Stopped);
    assert!(target.stop().is_none());

    assert_eq!(target.execute(&read10(3, 1)), CommandStatus::Failed);
    Ok(())
}

#[test]
fn init_resets_state_but_keeps_commands() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;
    target.register(
        SYNCHRONIZE_CACHE_10,
        HandlerEntry::new("SYNCHRONIZE CACHE(10)", 10, synchronize_cache),
    );

    rig.wire.limit_chunk(Some(100));
    assert_eq!(target.execute(&read10(0, 1)), CommandStatus::Failed);
    assert_eq!(target.residue(), 412);
    assert_eq!(target.execute(&[0xEE; 6]), CommandStatus::Failed);

    target.init();
    assert_eq!(target.state(), TargetState::Stopped);
    assert_eq!(target.residue(), 0);
    assert_eq!(target.sense().as_bytes(), &[0u8; 18]);
    assert!(target.config().is_none());
    assert!(target.commands().lookup(SYNCHRONIZE_CACHE_10).is_some());
    Ok(())
}

#[test]
fn empty_command_buffer() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    assert_eq!(target.execute(&[]), CommandStatus::Failed);
    assert_eq!(
        target.sense().condition(),
        Some(SenseCondition::INVALID_COMMAND)
    );
    assert!(rig.wire.sent().is_empty());
    Ok(())
}

#[test]
fn registered_handler_is_dispatched() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    let cdb = [SYNCHRONIZE_CACHE_10, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(target.execute(&cdb), CommandStatus::Failed);
    assert_eq!(
        target.sense().condition(),
        Some(SenseCondition::INVALID_COMMAND)
    );

    let displaced = target.register(
        SYNCHRONIZE_CACHE_10,
        HandlerEntry::new("SYNCHRONIZE CACHE(10)", 10, synchronize_cache),
    );
    assert!(displaced.is_none());
    assert_eq!(target.execute(&cdb), CommandStatus::Success);
    assert!(target.sense().is_ok());

    // the standard table can be overridden too
    let old = target.register(0x00, HandlerEntry::new("TUR", 6, synchronize_cache));
    assert_eq!(old.map(|e| e.name), Some("TEST UNIT READY"));

    let ops: Vec<u8> = target.commands().opcodes().collect();
    assert_eq!(ops, [0x00, 0x03, 0x12, 0x1A, 0x1E, 0x25, 0x28, 0x2A, 0x35]);
    Ok(())
}
