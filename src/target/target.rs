// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::{debug, info, warn};

use crate::{
    control_block::inquiry::InquiryResponse,
    models::sense_data::{SenseCondition, SenseKey, SenseRecord},
    target::{
        config::{TargetConfig, TargetOptions},
        device::BlockDeviceInfo,
        dispatch::{CommandTable, HandlerEntry, HandlerResult},
        sense::SenseState,
    },
    utils::cdb_hex,
};

/// Run-state of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetState {
    #[default]
    Stopped,
    Ready,
}

/// Outcome of one command. Details of a failure live in the sense record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failed,
}

impl CommandStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, CommandStatus::Success)
    }
}

/// A SCSI target serving one logical unit.
///
/// Commands are executed one at a time through [`ScsiTarget::execute`];
/// errors are reported the SCSI way, through the sense record an initiator
/// fetches with REQUEST SENSE.
#[derive(Debug)]
pub struct ScsiTarget<'a> {
    config: Option<TargetConfig<'a>>,
    sense: SenseState,
    residue: u32,
    state: TargetState,
    options: TargetOptions,
    table: CommandTable,
}

impl Default for ScsiTarget<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScsiTarget<'a> {
    /// A stopped target with the standard command table.
    pub fn new() -> Self {
        Self::with_options(TargetOptions::default())
    }

    pub fn with_options(options: TargetOptions) -> Self {
        Self {
            config: None,
            sense: SenseState::default(),
            residue: 0,
            state: TargetState::Stopped,
            options,
            table: CommandTable::standard(),
        }
    }

    /// Reset to the freshly constructed state: stopped, no configuration,
    /// all-zero sense, no residue. The command table and options are kept.
    pub fn init(&mut self) {
        self.config = None;
        self.residue = 0;
        self.sense.clear();
        self.state = TargetState::Stopped;
    }

    /// Bind `config` and become ready. Returns the configuration bound
    /// before, if any.
    pub fn start(&mut self, config: TargetConfig<'a>) -> Option<TargetConfig<'a>> {
        info!(device = ?config.device_info(), "SCSI target ready");
        self.state = TargetState::Ready;
        self.config.replace(config)
    }

    /// Release the configuration and stop.
    pub fn stop(&mut self) -> Option<TargetConfig<'a>> {
        info!("SCSI target stopped");
        self.state = TargetState::Stopped;
        self.config.take()
    }

    /// Bytes left over by the most recent short transfer; 0 if there never
    /// was one.
    #[inline]
    pub fn residue(&self) -> u32 {
        self.residue
    }

    #[inline]
    pub fn state(&self) -> TargetState {
        self.state
    }

    #[inline]
    pub fn sense(&self) -> &SenseRecord {
        self.sense.record()
    }

    #[inline]
    pub fn options(&self) -> TargetOptions {
        self.options
    }

    #[inline]
    pub fn config(&self) -> Option<&TargetConfig<'a>> {
        self.config.as_ref()
    }

    /// Add or replace a command handler.
    pub fn register(&mut self, opcode: u8, entry: HandlerEntry) -> Option<HandlerEntry> {
        self.table.register(opcode, entry)
    }

    #[inline]
    pub fn commands(&self) -> &CommandTable {
        &self.table
    }

    /// Execute one command descriptor block.
    pub fn execute(&mut self, cdb: &[u8]) -> CommandStatus {
        let Some(&opcode) = cdb.first() else {
            warn!("empty command buffer");
            self.sense.set(SenseCondition::INVALID_COMMAND);
            return CommandStatus::Failed;
        };

        let entry = self.table.lookup(opcode);

        // Overwritten below if the handler fails.
        if !entry.is_some_and(|e| e.preserves_sense) {
            self.sense.set_ok();
        }

        let result = match entry {
            None => {
                debug!("unhandled opcode {opcode:#04x}");
                Err(SenseCondition::INVALID_COMMAND)
            },
            Some(e) if cdb.len() < e.cdb_len => {
                debug!("{}: {} byte CDB, need {}", e.name, cdb.len(), e.cdb_len);
                Err(SenseCondition::INVALID_FIELD_IN_CDB)
            },
            Some(e) => {
                debug!("{} cdb={}", e.name, cdb_hex(cdb));
                (e.execute)(self, cdb)
            },
        };

        match result {
            Ok(status) => status,
            Err(cond) => {
                warn!("CHECK CONDITION for opcode {opcode:#04x}: {cond}");
                self.sense.set(cond);
                CommandStatus::Failed
            },
        }
    }

    // ── Handler API ─────────────────────────────────────────────────────────

    #[inline]
    pub fn set_sense(&mut self, key: SenseKey, asc: u8, ascq: u8) {
        self.sense.set_sense(key, asc, ascq);
    }

    #[inline]
    pub fn set_sense_ok(&mut self) {
        self.sense.set_ok();
    }

    /// Mutable access to the bound configuration, or the condition to report
    /// when none is bound.
    #[inline]
    pub fn config_mut(&mut self) -> Result<&mut TargetConfig<'a>, SenseCondition> {
        self.config
            .as_mut()
            .ok_or(SenseCondition::MEDIUM_NOT_PRESENT)
    }

    #[inline]
    pub fn device_info(&self) -> Result<BlockDeviceInfo, SenseCondition> {
        self.config
            .as_ref()
            .map(|c| c.device_info())
            .ok_or(SenseCondition::MEDIUM_NOT_PRESENT)
    }

    #[inline]
    pub fn inquiry_template(&self) -> Result<&'a InquiryResponse, SenseCondition> {
        self.config
            .as_ref()
            .map(|c| c.inquiry())
            .ok_or(SenseCondition::MEDIUM_NOT_PRESENT)
    }

    /// Send a fixed-size response. A short send records the residue and
    /// fails without touching sense.
    pub fn transmit(&mut self, data: &[u8]) -> HandlerResult {
        let cfg = self.config_mut()?;
        let sent = cfg.transport.transmit(data);
        let residue = data.len().saturating_sub(sent);
        if residue > 0 {
            warn!("short transmit: {sent} of {} bytes", data.len());
            self.residue = u32::try_from(residue).unwrap_or(u32::MAX);
            Ok(CommandStatus::Failed)
        } else {
            Ok(CommandStatus::Success)
        }
    }

    /// Record the residue of a short data phase.
    #[inline]
    pub fn set_residue(&mut self, residue: u32) {
        self.residue = residue;
    }
}
