use std::fs;

use anyhow::Result;
use hex::FromHex;
use scsi_target_rs::control_block::common::{
    DataRequest, READ_10, WRITE_10, build_read10, build_write10,
};

fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

#[test]
fn test_read10_build_matches_fixture() -> Result<()> {
    let expected = load_fixture("tests/unit_tests/fixtures/scsi_commands/read10_request.hex")?;

    let mut cdb = [0u8; 16];
    build_read10(&mut cdb, 997, 3, 0, 0);

    assert_eq!(&cdb[..], &expected[..], "READ(10) CDB mismatch");
    Ok(())
}

#[test]
fn test_write10_build_matches_fixture() -> Result<()> {
    let expected = load_fixture("tests/unit_tests/fixtures/scsi_commands/write10_request.hex")?;

    let mut cdb = [0u8; 16];
    build_write10(&mut cdb, 0x1234, 1, 0, 0);

    assert_eq!(&cdb[..], &expected[..], "WRITE(10) CDB mismatch");
    Ok(())
}

#[test]
fn test_decode_fixture_fields() -> Result<()> {
    let cdb = load_fixture("tests/unit_tests/fixtures/scsi_commands/read10_request.hex")?;
    assert_eq!(cdb[0], READ_10);

    let req = DataRequest::decode(&cdb)?;
    assert_eq!(req.first_lba, 997);
    assert_eq!(req.block_count, 3);
    assert_eq!(req.end_lba(), 1000);
    assert!(req.fits_within(1000));
    assert!(!req.fits_within(999));
    assert_eq!(req.byte_len(512), 1536);
    Ok(())
}

#[test]
fn test_encode_decode_extremes() -> Result<()> {
    for (lba, count) in [(0u32, 0u16), (u32::MAX, u16::MAX), (0x0102_0304, 0x0506)] {
        let mut cdb = [0u8; 10];
        cdb[0] = WRITE_10;
        cdb[9] = 0xAA;
        DataRequest::new(lba, count).encode_into(&mut cdb)?;

        assert_eq!(DataRequest::decode(&cdb)?, DataRequest::new(lba, count));
        assert_eq!(cdb[0], WRITE_10, "opcode clobbered");
        assert_eq!(cdb[9], 0xAA, "control byte clobbered");
    }
    Ok(())
}

#[test]
fn test_big_endian_layout() -> Result<()> {
    let cdb = [READ_10, 0, 0x01, 0x02, 0x03, 0x04, 0, 0x05, 0x06, 0];
    let req = DataRequest::decode(&cdb)?;
    assert_eq!(req.first_lba, 0x0102_0304);
    assert_eq!(req.block_count, 0x0506);
    Ok(())
}

#[test]
fn test_end_lba_does_not_wrap() {
    let req = DataRequest::new(u32::MAX, 2);
    assert_eq!(req.end_lba(), u64::from(u32::MAX) + 2);
    assert!(!req.fits_within(u32::MAX));
}

#[test]
fn test_short_cdb_rejected() {
    assert!(DataRequest::decode(&[READ_10, 0, 0, 0, 0, 1, 0, 0]).is_err());
}
