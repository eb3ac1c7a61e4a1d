//! Reference collaborators: a RAM disk and a loopback byte channel.
//!
//! Both are cheap-clone handles onto shared state, so a test (or the demo)
//! keeps one handle for inspection while the target borrows another.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// In-memory byte channel.
pub mod loopback;
/// RAM-backed block device.
pub mod mem_block;

pub use loopback::LoopbackTransport;
pub use mem_block::MemBlockDevice;
