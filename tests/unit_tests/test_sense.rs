use std::fs;

use anyhow::Result;
use hex::FromHex;
use hex_literal::hex;
use scsi_target_rs::{
    control_block::request_sense::{RequestSenseCdb, fill_request_sense, fill_request_sense_simple},
    models::{
        asc_ascq::asc_ascq_to_str,
        sense_data::{
            ADDITIONAL_SENSE_LEN, FIXED_SENSE_LEN, RESPONSE_CODE_FIXED_CURRENT, SenseCondition,
            SenseKey, SenseRecord, asc,
        },
    },
};

fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

#[test]
fn test_request_sense_build() -> Result<()> {
    let expected =
        load_fixture("tests/unit_tests/fixtures/scsi_commands/request_sense_request.hex")?;

    let mut cdb = [0u8; 16];
    fill_request_sense_simple(&mut cdb);

    assert_eq!(&cdb[..], &expected[..]);
    assert!(RequestSenseCdb::decode(&cdb)?.is_acceptable());
    Ok(())
}

#[test]
fn test_request_sense_cdb_shapes() -> Result<()> {
    let mut cdb = [0u8; 16];

    fill_request_sense(&mut cdb, true, FIXED_SENSE_LEN as u8, 0);
    assert!(!RequestSenseCdb::decode(&cdb)?.is_acceptable(), "DESC=1 accepted");

    fill_request_sense(&mut cdb, false, 252, 0);
    assert!(!RequestSenseCdb::decode(&cdb)?.is_acceptable(), "alloc 252 accepted");

    fill_request_sense_simple(&mut cdb);
    cdb[3] = 1;
    assert!(!RequestSenseCdb::decode(&cdb)?.is_acceptable(), "reserved byte ignored");
    Ok(())
}

#[test]
fn test_record_layout_matches_fixture() -> Result<()> {
    let expected =
        load_fixture("tests/unit_tests/fixtures/scsi_commands/sense_lba_out_of_range.hex")?;

    let rec = SenseRecord::from_condition(SenseCondition::LBA_OUT_OF_RANGE);
    assert_eq!(&rec.as_bytes()[..], &expected[..]);

    assert_eq!(rec.response_code(), RESPONSE_CODE_FIXED_CURRENT);
    assert_eq!(rec.sense_key(), SenseKey::IllegalRequest as u8);
    assert_eq!(rec.additional_len(), ADDITIONAL_SENSE_LEN);
    assert_eq!(rec.asc(), asc::LBA_OUT_OF_RANGE);
    assert_eq!(rec.ascq(), 0);
    assert_eq!(rec.condition(), Some(SenseCondition::LBA_OUT_OF_RANGE));
    Ok(())
}

#[test]
fn test_ok_record() {
    let rec = SenseRecord::from_condition(SenseCondition::OK);
    assert_eq!(
        rec.as_bytes(),
        &hex!("70 00 00 00 00 00 00 08 00 00 00 00 00 00 00 00 00 00")
    );
    assert!(rec.is_ok());
}

#[test]
fn test_zeroed_record_has_no_condition() {
    let rec = SenseRecord::zeroed();
    assert_eq!(rec.condition(), None);
    assert!(!rec.is_ok());
    assert_eq!(rec, SenseRecord::default());
}

#[test]
fn test_parse_round_trip_and_rejects() -> Result<()> {
    let raw = SenseRecord::from_condition(SenseCondition::MEDIUM_NOT_PRESENT);
    let parsed = SenseRecord::parse(raw.as_bytes())?;
    assert_eq!(parsed.condition(), Some(SenseCondition::MEDIUM_NOT_PRESENT));

    assert!(SenseRecord::parse(&raw.as_bytes()[..17]).is_err());

    let mut desc_format = *raw.as_bytes();
    desc_format[0] = 0x72;
    assert!(SenseRecord::parse(&desc_format).is_err());
    Ok(())
}

#[test]
fn test_descriptions() {
    assert_eq!(asc_ascq_to_str(0x21, 0x00), "Logical block address out of range");
    assert_eq!(asc_ascq_to_str(0x20, 0x00), "Invalid command operation code");
    assert_eq!(asc_ascq_to_str(0xEE, 0xEE), "UNSPECIFIED / vendor specific");
    assert_eq!(
        SenseCondition::INVALID_FIELD_IN_CDB.to_string(),
        "IllegalRequest 24h/00h (Invalid field in CDB)"
    );
}
