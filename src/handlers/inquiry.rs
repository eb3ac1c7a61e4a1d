// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;
use zerocopy::IntoBytes;

use crate::{
    control_block::inquiry::InquiryCdb,
    models::sense_data::SenseCondition,
    target::{ScsiTarget, dispatch::HandlerResult},
};

/// INQUIRY: send the configured 36-byte template.
///
/// Only standard data is served. EVPD, CMDDT or a non-zero page code are
/// refused with INVALID FIELD IN CDB; the allocation length is not
/// consulted.
pub fn handle(target: &mut ScsiTarget<'_>, cdb: &[u8]) -> HandlerResult {
    let req = InquiryCdb::decode(cdb).map_err(|_| SenseCondition::INVALID_FIELD_IN_CDB)?;
    if !req.is_standard() {
        debug!(flags = ?req.flags, page = req.page_code, "INQUIRY: VPD not supported");
        return Err(SenseCondition::INVALID_FIELD_IN_CDB);
    }

    let template = target.inquiry_template()?;
    target.transmit(template.as_bytes())
}
