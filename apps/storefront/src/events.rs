//! # Event Bus
//!
//! In-process fan-out of storefront events to whoever subscribed.
//!
//! ## Event Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StorefrontEvent                                  │
//! │                                                                         │
//! │  CartChanged                 no payload; subscribers re-read the cart  │
//! │  SlideChanged {index,total}  carousel moved                            │
//! │  Notice {level,message}      toast text for the view to render         │
//! │                                                                         │
//! │  CartStore ──┐                                  ┌──► badge view        │
//! │              ├──► EventBus (broadcast, 256) ────┼──► cart modal        │
//! │  Carousel ───┘                                  └──► toast view        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Publishing never blocks and never fails. A subscriber that falls more than
//! 256 events behind skips ahead (`RecvError::Lagged`).

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

/// Bus capacity per subscriber.
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing message. Rendering is up to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Notice {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Error, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StorefrontEvent {
    CartChanged,
    SlideChanged { index: usize, total: usize },
    Notice(Notice),
}

/// Cloneable handle to the bus. All clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StorefrontEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        EventBus { tx }
    }

    /// Registers a new subscriber. It sees events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: StorefrontEvent) {
        trace!(?event, "Publishing event");
        // No subscribers is fine.
        let _ = self.tx.send(event);
    }

    pub fn notify(&self, notice: Notice) {
        self.publish(StorefrontEvent::Notice(notice));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
