use std::fs;

use anyhow::Result;
use hex::FromHex;
use scsi_target_rs::control_block::mod_sense::{
    DeviceSpecific, MODE_SENSE_6_LEN, ModeSense6Response, fill_mode_sense6_simple,
};

fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

#[test]
fn test_mode_sense6_request_build() -> Result<()> {
    let expected =
        load_fixture("tests/unit_tests/fixtures/scsi_commands/mode_sense6_request.hex")?;

    let mut cdb = [0u8; 16];
    fill_mode_sense6_simple(&mut cdb, MODE_SENSE_6_LEN as u8);

    assert_eq!(&cdb[..], &expected[..]);
    Ok(())
}

#[test]
fn test_header_for_writable_device() -> Result<()> {
    let expected =
        load_fixture("tests/unit_tests/fixtures/scsi_commands/mode_sense6_response.hex")?;

    let hdr = ModeSense6Response::for_device(false);
    assert_eq!(&hdr.to_bytes()[..], &expected[..]);
    assert!(!hdr.write_protected());
    Ok(())
}

#[test]
fn test_write_protect_bit() -> Result<()> {
    let hdr = ModeSense6Response::for_device(true);
    let bytes = hdr.to_bytes();
    assert_eq!(bytes, [3, 0, 0x80, 0]);

    let parsed = ModeSense6Response::parse(&bytes)?;
    assert!(parsed.write_protected());
    assert_eq!(parsed.device_specific, DeviceSpecific::WP);
    Ok(())
}
