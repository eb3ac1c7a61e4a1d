// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;
use std::collections::BTreeMap;

use crate::{
    handlers::{data_transfer, inquiry, mode_sense, no_data, read_capacity, request_sense},
    models::{opcode::ScsiOpcode, sense_data::SenseCondition},
    target::target::{CommandStatus, ScsiTarget},
};

/// What a handler hands back to the dispatcher.
///
/// `Err` carries the condition to record in sense data; the command then
/// reports FAILED. `Ok(CommandStatus::Failed)` is a failure that leaves sense
/// alone (a short transfer, with residue recorded).
pub type HandlerResult = Result<CommandStatus, SenseCondition>;

pub type HandlerFn = fn(&mut ScsiTarget<'_>, &[u8]) -> HandlerResult;

/// One row of the command table.
#[derive(Clone, Copy)]
pub struct HandlerEntry {
    pub name: &'static str,
    /// Shortest command buffer the handler may be given. Handlers that only
    /// look at the opcode use 1.
    pub cdb_len: usize,
    /// Skip the dispatch-time reset to "no error" so the handler sees the
    /// record the previous command left.
    pub preserves_sense: bool,
    pub execute: HandlerFn,
}

impl HandlerEntry {
    pub const fn new(name: &'static str, cdb_len: usize, execute: HandlerFn) -> Self {
        Self {
            name,
            cdb_len,
            preserves_sense: false,
            execute,
        }
    }

    pub const fn preserving_sense(mut self) -> Self {
        self.preserves_sense = true;
        self
    }

    fn for_opcode(op: ScsiOpcode, execute: HandlerFn) -> Self {
        Self::new(op.name(), op.cdb_len(), execute)
    }

    fn opcode_only(op: ScsiOpcode, execute: HandlerFn) -> Self {
        Self::new(op.name(), 1, execute)
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("name", &self.name)
            .field("cdb_len", &self.cdb_len)
            .field("preserves_sense", &self.preserves_sense)
            .finish_non_exhaustive()
    }
}

/// Opcode → handler mapping consulted by [`ScsiTarget::execute`].
#[derive(Clone, Default)]
pub struct CommandTable {
    entries: BTreeMap<u8, HandlerEntry>,
}

impl CommandTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The command set of a minimal direct-access target.
    pub fn standard() -> Self {
        use ScsiOpcode::*;

        let mut t = Self::empty();
        t.insert(Inquiry, inquiry::handle);
        t.register(
            RequestSense.into(),
            HandlerEntry::for_opcode(RequestSense, request_sense::handle).preserving_sense(),
        );
        t.insert(Read10, data_transfer::handle);
        t.insert(Write10, data_transfer::handle);
        for (op, execute) in [
            (ReadCapacity10, read_capacity::handle as HandlerFn),
            (TestUnitReady, no_data::handle),
            (PreventAllowMediumRemoval, no_data::handle),
            (ModeSense6, mode_sense::handle),
        ] {
            t.register(op.into(), HandlerEntry::opcode_only(op, execute));
        }
        t
    }

    fn insert(&mut self, op: ScsiOpcode, execute: HandlerFn) {
        self.register(op.into(), HandlerEntry::for_opcode(op, execute));
    }

    /// Add or replace the handler for `opcode`, returning the one it
    /// displaced.
    pub fn register(&mut self, opcode: u8, entry: HandlerEntry) -> Option<HandlerEntry> {
        self.entries.insert(opcode, entry)
    }

    #[inline]
    pub fn lookup(&self, opcode: u8) -> Option<HandlerEntry> {
        self.entries.get(&opcode).copied()
    }

    pub fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(op, e)| (format!("{op:#04x}"), e.name)),
            )
            .finish()
    }
}
