//! Wire-level vocabulary shared by the target and its initiator-side
//! helpers: opcodes, sense data and big-endian field access.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// ASC/ASCQ descriptions.
pub mod asc_ascq;
/// Big-endian field accessors.
pub mod codec;
/// Supported SCSI operation codes.
pub mod opcode;
/// Sense keys, conditions and the fixed-format sense record.
pub mod sense_data;
