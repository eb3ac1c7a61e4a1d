// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result, ensure};
use scsi_target_rs::{
    backend::{LoopbackTransport, MemBlockDevice},
    cfg::{cli::config_path_from, config::Config, logger::init_logger},
    control_block::{
        common::{build_read10, build_write10},
        inquiry::{fill_inquiry_standard_simple, parse_inquiry_standard},
        read_capacity::{ReadCapacity10Response, build_read_capacity10},
        request_sense::fill_request_sense_simple,
    },
    models::sense_data::SenseRecord,
    target::{ScsiTarget, TargetConfig},
};
use tracing::{info, warn};

fn main() -> Result<()> {
    let _init_logger = init_logger("tests/config_logger.yaml")?;

    let config = config_path_from(std::env::args(), "tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    let disk = MemBlockDevice::from_info(config.device_info())?;
    disk.fill_pattern();
    let wire = LoopbackTransport::new();
    let inquiry = config.inquiry_response();
    let block_size = config.device.block_size as usize;
    let mut scratch = vec![0u8; block_size];

    let mut device = disk.clone();
    let mut transport = wire.clone();
    let mut target = ScsiTarget::with_options(config.target_options());
    target.start(TargetConfig::new(
        &mut device,
        &mut transport,
        &mut scratch,
        &inquiry,
    )?);

    let mut cdb = [0u8; 16];

    // ---- INQUIRY ----
    fill_inquiry_standard_simple(&mut cdb);
    let status = target.execute(&cdb[..6]);
    let inq = parse_inquiry_standard(&wire.take_sent())?;
    info!(
        ?status,
        vendor = %inq.vendor_id,
        product = %inq.product_id,
        rev = %inq.product_rev,
        "[INQUIRY]"
    );

    // ---- READ CAPACITY(10) ----
    build_read_capacity10(&mut cdb, 0, false, 0);
    let status = target.execute(&cdb[..10]);
    let sent = wire.take_sent();
    let cap = ReadCapacity10Response::parse(&sent)?;
    info!(
        ?status,
        last_lba = cap.max_lba.get(),
        block_len = cap.block_len.get(),
        bytes = cap.total_bytes(),
        "[READ CAPACITY]"
    );

    // ---- WRITE(10) then READ(10) of the same block ----
    let payload = vec![0xA5u8; block_size];
    wire.push_inbound(&payload);
    build_write10(&mut cdb, 1, 1, 0, 0);
    let status = target.execute(&cdb[..10]);
    info!(?status, "[WRITE] lba=1 blocks=1");

    build_read10(&mut cdb, 1, 1, 0, 0);
    let status = target.execute(&cdb[..10]);
    let back = wire.take_sent();
    ensure!(back[..] == payload[..], "read-back differs from written block");
    info!(?status, len = back.len(), "[READ] lba=1 blocks=1 matches");

    // ---- READ past the end, then REQUEST SENSE ----
    let blocks = config.device.block_count;
    build_read10(&mut cdb, blocks.saturating_sub(1), 2, 0, 0);
    let status = target.execute(&cdb[..10]);
    warn!(?status, "[READ] past end of medium");

    fill_request_sense_simple(&mut cdb);
    let status = target.execute(&cdb[..6]);
    let sense = SenseRecord::parse(&wire.take_sent())?;
    info!(?status, ?sense, "[REQUEST SENSE]");

    target.stop();
    Ok(())
}
