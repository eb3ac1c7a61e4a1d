// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::models::sense_data::{SenseCondition, SenseKey, SenseRecord};

/// The single sense record of a target.
///
/// Every update replaces the whole record, so a reader never sees fields from
/// two different conditions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SenseState {
    record: SenseRecord,
}

impl SenseState {
    /// Back to the all-zero record of a freshly initialised target.
    #[inline]
    pub fn clear(&mut self) {
        self.record = SenseRecord::zeroed();
    }

    #[inline]
    pub fn set_sense(&mut self, key: SenseKey, asc: u8, ascq: u8) {
        self.set(SenseCondition::new(key, asc, ascq));
    }

    #[inline]
    pub fn set(&mut self, cond: SenseCondition) {
        self.record = SenseRecord::from_condition(cond);
    }

    #[inline]
    pub fn set_ok(&mut self) {
        self.set(SenseCondition::OK);
    }

    #[inline]
    pub fn record(&self) -> &SenseRecord {
        &self.record
    }
}
