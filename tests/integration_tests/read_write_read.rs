// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result};
use scsi_target_rs::{
    cfg::logger::init_logger, models::sense_data::SenseCondition, target::CommandStatus,
};

use crate::integration_tests::common::{Rig, read10, request_sense, write10};

#[test]
fn read_past_end_then_last_three_blocks() -> Result<()> {
    let _logger = init_logger("tests/config_logger.yaml");

    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    // ---- 998 + 3 > 1000 ----
    assert_eq!(target.execute(&read10(998, 3)), CommandStatus::Failed);
    assert!(rig.wire.sent().is_empty(), "data sent for a rejected READ");
    let sense = request_sense(&mut target, &rig.wire)?;
    assert_eq!(sense.condition(), Some(SenseCondition::LBA_OUT_OF_RANGE));

    // ---- 997 + 3 == 1000 ----
    assert_eq!(target.execute(&read10(997, 3)), CommandStatus::Success);
    let data = rig.wire.take_sent();
    assert_eq!(data.len(), 1536);

    let expected = rig.disk.blocks(997, 3).context("blocks 997..1000")?;
    assert_eq!(&data[..], &expected[..]);
    assert_eq!(&data[..4], &997u32.to_be_bytes());
    assert_eq!(&data[512..516], &998u32.to_be_bytes());
    assert_eq!(&data[1024..1028], &999u32.to_be_bytes());
    assert!(target.sense().is_ok());

    Ok(())
}

#[test]
fn write_then_read_back() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    let payload: Vec<u8> = (0..1024u32).map(|i| (i * 7) as u8).collect();
    rig.wire.push_inbound(&payload);

    assert_eq!(target.execute(&write10(10, 2)), CommandStatus::Success);
    assert_eq!(rig.wire.inbound_len(), 0);
    assert!(rig.wire.sent().is_empty(), "WRITE must not transmit");
    assert_eq!(rig.disk.blocks(10, 2).context("blocks 10..12")?, payload);

    assert_eq!(target.execute(&read10(10, 2)), CommandStatus::Success);
    assert_eq!(&rig.wire.take_sent()[..], &payload[..]);

    // neighbours untouched
    let before = rig.disk.block(9).context("block 9")?;
    let after = rig.disk.block(12).context("block 12")?;
    assert_eq!(&before[..4], &9u32.to_be_bytes());
    assert_eq!(&after[..4], &12u32.to_be_bytes());

    Ok(())
}

#[test]
fn zero_length_transfers() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    assert_eq!(target.execute(&read10(0, 0)), CommandStatus::Success);
    assert_eq!(target.execute(&read10(1000, 0)), CommandStatus::Success);
    assert_eq!(target.execute(&write10(500, 0)), CommandStatus::Success);
    assert!(rig.wire.sent().is_empty());

    // past the end even with nothing to move
    assert_eq!(target.execute(&read10(1001, 0)), CommandStatus::Failed);
    let sense = request_sense(&mut target, &rig.wire)?;
    assert_eq!(sense.condition(), Some(SenseCondition::LBA_OUT_OF_RANGE));

    Ok(())
}

#[test]
fn huge_lba_does_not_wrap_into_range() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    assert_eq!(target.execute(&read10(u32::MAX, 2)), CommandStatus::Failed);
    assert_eq!(target.execute(&write10(u32::MAX - 1, u16::MAX)), CommandStatus::Failed);
    assert!(rig.wire.sent().is_empty());

    let sense = request_sense(&mut target, &rig.wire)?;
    assert_eq!(sense.condition(), Some(SenseCondition::LBA_OUT_OF_RANGE));

    Ok(())
}
