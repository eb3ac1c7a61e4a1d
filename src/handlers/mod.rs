//! Command handlers, one module per command family.
//!
//! Every handler has the [`HandlerFn`](crate::target::dispatch::HandlerFn)
//! shape and is wired up by
//! [`CommandTable::standard`](crate::target::dispatch::CommandTable::standard).

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// READ(10) and WRITE(10).
pub mod data_transfer;
/// Standard INQUIRY data.
pub mod inquiry;
/// MODE SENSE(6) header.
pub mod mode_sense;
/// Commands with neither data nor checks: TEST UNIT READY, PREVENT ALLOW
/// MEDIUM REMOVAL.
pub mod no_data;
/// READ CAPACITY(10).
pub mod read_capacity;
/// REQUEST SENSE.
pub mod request_sense;
