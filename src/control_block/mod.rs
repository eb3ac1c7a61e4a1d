// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! CDB layouts and response structures, one module per command. Each module
//! has the builders an initiator uses and the decoders the target uses.

pub mod common;
pub mod inquiry;
pub mod mod_sense;
pub mod read_capacity;
pub mod request_sense;
pub mod test_unit_ready;
