//! The target side: lifecycle, dispatch, sense state and the block data
//! phase, plus the traits the firmware implements to plug in storage and a
//! byte channel.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Collaborator binding and behaviour switches.
pub mod config;
/// The `BlockDevice` trait and its error type.
pub mod device;
/// Opcode → handler table.
pub mod dispatch;
/// The single fixed-format sense record.
pub mod sense;
#[allow(clippy::module_inception)]
pub mod target;
/// Per-block READ(10)/WRITE(10) loop.
pub mod transfer;
/// The `Transport` trait.
pub mod transport;

pub use config::{TargetConfig, TargetOptions};
pub use device::{BlockDevice, BlockDeviceError, BlockDeviceInfo};
pub use dispatch::{CommandTable, HandlerEntry, HandlerFn, HandlerResult};
pub use target::{CommandStatus, ScsiTarget, TargetState};
pub use transport::Transport;
