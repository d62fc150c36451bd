//! # Contact Inbox
//!
//! Where contact form submissions are delivered.
//!
//! ```text
//!   submit_contact ──► ContactInbox::deliver(request)
//!                      └── SimulatedInbox: wait, then keep it in memory
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crafts_core::ContactRequest;

use crate::error::StoreResult;

#[async_trait]
pub trait ContactInbox: Send + Sync {
    /// Delivers one validated submission.
    async fn deliver(&self, request: &ContactRequest) -> StoreResult<()>;
}

/// Accepts every submission after a fixed delay, like a remote form API.
#[derive(Debug, Default)]
pub struct SimulatedInbox {
    latency: Duration,
    received: Mutex<Vec<ContactRequest>>,
}

impl SimulatedInbox {
    pub fn new(latency: Duration) -> Self {
        SimulatedInbox {
            latency,
            received: Mutex::default(),
        }
    }

    /// Submissions delivered so far, oldest first.
    pub fn received(&self) -> Vec<ContactRequest> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContactInbox for SimulatedInbox {
    async fn deliver(&self, request: &ContactRequest) -> StoreResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        debug!(from = %request.email, "Contact message delivered");
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        Ok(())
    }
}
