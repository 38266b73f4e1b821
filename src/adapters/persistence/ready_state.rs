//! Connection state cell shared by store adapters.

use crate::domain::ConnectionState;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lock-free holder for a store's `ConnectionState`. Read on every request, written only
/// by the owning adapter's lifecycle methods.
#[derive(Debug)]
pub struct ReadyState(AtomicU8);

impl ReadyState {
    pub fn new(state: ConnectionState) -> Self {
        Self(AtomicU8::new(encode(state)))
    }

    pub fn get(&self) -> ConnectionState {
        decode(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, state: ConnectionState) {
        self.0.store(encode(state), Ordering::Release);
    }
}

impl Default for ReadyState {
    fn default() -> Self {
        Self::new(ConnectionState::Disconnected)
    }
}

// 0..=3, matching the wire numbering reported by document-store drivers.
fn encode(state: ConnectionState) -> u8 {
    match state {
        ConnectionState::Disconnected => 0,
        ConnectionState::Connected => 1,
        ConnectionState::Connecting => 2,
        ConnectionState::Disconnecting => 3,
    }
}

fn decode(raw: u8) -> ConnectionState {
    match raw {
        1 => ConnectionState::Connected,
        2 => ConnectionState::Connecting,
        3 => ConnectionState::Disconnecting,
        _ => ConnectionState::Disconnected,
    }
}
