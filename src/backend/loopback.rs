// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{cell::RefCell, rc::Rc};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::target::transport::Transport;

#[derive(Debug, Default)]
struct Channel {
    /// Everything the target transmitted, in order.
    sent: BytesMut,
    /// Bytes waiting to be handed to `receive`.
    inbound: BytesMut,
    /// Per-call cap on bytes moved in either direction.
    max_chunk: Option<usize>,
}

/// In-memory initiator side of a [`Transport`]. Clones share the same
/// channel.
#[derive(Debug, Clone, Default)]
pub struct LoopbackTransport {
    inner: Rc<RefCell<Channel>>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the target's next `receive` calls.
    pub fn push_inbound(&self, data: &[u8]) {
        self.inner.borrow_mut().inbound.put_slice(data);
    }

    /// Move at most `n` bytes per call, simulating a short transfer. `None`
    /// lifts the cap.
    pub fn limit_chunk(&self, n: Option<usize>) {
        self.inner.borrow_mut().max_chunk = n;
    }

    /// Copy of everything transmitted so far.
    pub fn sent(&self) -> Bytes {
        Bytes::copy_from_slice(&self.inner.borrow().sent)
    }

    /// Drain everything transmitted so far.
    pub fn take_sent(&self) -> Bytes {
        self.inner.borrow_mut().sent.split().freeze()
    }

    pub fn inbound_len(&self) -> usize {
        self.inner.borrow().inbound.len()
    }
}

impl Transport for LoopbackTransport {
    fn transmit(&mut self, data: &[u8]) -> usize {
        let mut ch = self.inner.borrow_mut();
        let n = ch.max_chunk.map_or(data.len(), |cap| cap.min(data.len()));
        ch.sent.put_slice(&data[..n]);
        n
    }

    fn receive(&mut self, buf: &mut [u8]) -> usize {
        let mut ch = self.inner.borrow_mut();
        let cap = ch.max_chunk.unwrap_or(usize::MAX);
        let n = buf.len().min(ch.inbound.len()).min(cap);
        ch.inbound.copy_to_slice(&mut buf[..n]);
        n
    }
}
