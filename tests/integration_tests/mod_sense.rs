// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;
use scsi_target_rs::{
    control_block::mod_sense::{
        MODE_SENSE_6_LEN, ModeSense6Response, PageControl, fill_mode_sense6,
        fill_mode_sense6_simple,
    },
    models::sense_data::SenseCondition,
    target::CommandStatus,
};

use crate::integration_tests::common::{Rig, request_sense, write10};

#[test]
fn mode_sense_header_tracks_write_protect() -> Result<()> {
    let mut rig = Rig::standard()?;
    let mut target = rig.bench.start()?;

    let mut cdb = [0u8; 16];
    fill_mode_sense6_simple(&mut cdb, MODE_SENSE_6_LEN as u8);
    assert_eq!(target.execute(&cdb[..6]), CommandStatus::Success);
    assert_eq!(&rig.wire.take_sent()[..], &[3, 0, 0, 0]);

    rig.disk.set_write_protected(true);

    // page selection does not change the answer
    fill_mode_sense6(&mut cdb, false, PageControl::Default, 0x08, 0, 0xFF, 0);
    assert_eq!(target.execute(&cdb[..6]), CommandStatus::Success);
    let hdr = ModeSense6Response::parse(&rig.wire.take_sent())?;
    assert!(hdr.write_protected());

    // the host should now stay away; a WRITE anyway is refused
    rig.wire.push_inbound(&[0u8; 512]);
    assert_eq!(target.execute(&write10(0, 1)), CommandStatus::Failed);
    let sense = request_sense(&mut target, &rig.wire)?;
    assert_eq!(sense.condition(), Some(SenseCondition::WRITE_PROTECTED));
    Ok(())
}
