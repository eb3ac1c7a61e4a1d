// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{
    control_block::request_sense::RequestSenseCdb,
    models::sense_data::SenseCondition,
    target::{ScsiTarget, dispatch::HandlerResult},
};

/// REQUEST SENSE: send the current 18-byte record unchanged.
///
/// The dispatcher does not reset sense before this handler runs, so the
/// record is the one the previous command left and a repeated REQUEST SENSE
/// returns the same bytes. A record nothing has written yet is reported as
/// "no error".
pub fn handle(target: &mut ScsiTarget<'_>, cdb: &[u8]) -> HandlerResult {
    let req = RequestSenseCdb::decode(cdb).map_err(|_| SenseCondition::INVALID_FIELD_IN_CDB)?;
    if !req.is_acceptable() {
        debug!(?req, "REQUEST SENSE: unsupported CDB");
        return Err(SenseCondition::INVALID_FIELD_IN_CDB);
    }

    if target.sense().response_code() == 0 {
        target.set_sense_ok();
    }
    let record = *target.sense();
    target.transmit(record.as_bytes())
}
