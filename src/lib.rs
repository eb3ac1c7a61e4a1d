//! This crate provides the target side of a minimal SCSI block command set,
//! as served by a USB mass-storage gadget or similar firmware.
// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// RAM disk and loopback transport used by the demo and the tests.
pub mod backend;
/// Handles configuration, command-line parsing, and logging.
pub mod cfg;
/// Implements the CDB layouts and response data of each SCSI command.
pub mod control_block;
/// Contains the per-opcode command handlers.
pub mod handlers;
/// Defines opcodes, sense data and big-endian field helpers.
pub mod models;
/// The SCSI target: lifecycle, dispatch and data transfer.
pub mod target;
/// Provides utility functions used throughout the crate.
pub mod utils;
