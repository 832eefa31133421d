//! Request sequencing
//!
//! Each outgoing list request gets a ticket with a sequence number and a
//! cancel token. Issuing a newer ticket cancels the older ones, and a
//! response is only accepted when its ticket is still the latest, so a slow
//! stale response can never overwrite a fresh one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared cancellation flag for an in-flight request
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle for one issued request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    seq: u64,
    token: CancelToken,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Token to hand to the HTTP layer
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Issues tickets and decides which responses are still wanted
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
    in_flight: Option<CancelToken>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding the previous one
    pub fn issue(&mut self) -> RequestTicket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.latest += 1;
        let token = CancelToken::new();
        self.in_flight = Some(token.clone());
        debug!("Issued request #{}", self.latest);

        RequestTicket {
            seq: self.latest,
            token,
        }
    }

    /// Whether a response for this ticket should be applied
    pub fn accept(&self, ticket: &RequestTicket) -> bool {
        let current = ticket.seq == self.latest && !ticket.is_cancelled();
        if !current {
            debug!(
                "Discarding stale response #{} (latest #{})",
                ticket.seq, self.latest
            );
        }
        current
    }

    /// Cancel whatever is in flight, e.g. when the view goes away
    pub fn cancel_all(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest
    }
}
