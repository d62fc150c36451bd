//! # Contact Commands
//!
//! The contact section's form submission.
//!
//! ## Outcomes
//! ```text
//! submit_contact(request)
//!   ├── blank name/email/message, bad email ──► VALIDATION_ERROR, no notice;
//!   │                                          the view shows it inline
//!   ├── inbox delivery fails ─────────────────► UNAVAILABLE + error notice;
//!   │                                          the form stays editable
//!   └── delivered (after the simulated delay) ► ContactReceipt + success notice
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crafts_core::ContactRequest;
use crafts_store::ContactInbox;

use crate::error::{ApiError, ApiResult};
use crate::events::{EventBus, Notice};

pub const CONTACT_REPLY: &str =
    "Thank you for your message! We will get back to you within 24-48 hours.";
pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully!";
pub const CONTACT_FAILED_MESSAGE: &str = "Error sending message. Please try again.";

/// Acknowledgement of a delivered contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

/// Validates and delivers a contact form submission.
///
/// ## Errors
/// - `VALIDATION_ERROR` when a required field is blank or the email is malformed
/// - `UNAVAILABLE` when delivery fails
pub async fn submit_contact(
    inbox: &dyn ContactInbox,
    events: &EventBus,
    request: ContactRequest,
) -> ApiResult<ContactReceipt> {
    debug!("submit_contact command");

    let request = request.normalized()?;

    if let Err(e) = inbox.deliver(&request).await {
        warn!(error = %e, "Contact message not delivered");
        events.notify(Notice::error(CONTACT_FAILED_MESSAGE));
        return Err(ApiError::unavailable(CONTACT_FAILED_MESSAGE));
    }

    let receipt = ContactReceipt {
        reference: Uuid::new_v4(),
        message: CONTACT_REPLY.to_string(),
        received_at: Utc::now(),
    };
    info!(reference = %receipt.reference, "Contact message received");
    events.notify(Notice::success(CONTACT_SENT_MESSAGE));
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use crafts_store::{SimulatedInbox, StoreError, StoreResult};
    use tokio::sync::broadcast;

    use crate::error::ErrorCode;
    use crate::events::StorefrontEvent;

    #[derive(Debug)]
    struct OfflineInbox;

    #[async_trait]
    impl ContactInbox for OfflineInbox {
        async fn deliver(&self, _request: &ContactRequest) -> StoreResult<()> {
            Err(StoreError::Unavailable("mail relay offline".to_string()))
        }
    }

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            subject: "Custom order".to_string(),
            message: message.to_string(),
        }
    }

    fn drain(rx: &mut broadcast::Receiver<StorefrontEvent>) -> Vec<StorefrontEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let inbox = SimulatedInbox::default();
        let events = EventBus::new();
        let mut rx = events.subscribe();

        for (name, email, message, field) in [
            ("", "fan@example.com", "Hello there", "name"),
            ("Danny", "   ", "Hello there", "email"),
            ("Danny", "fan@example.com", "", "message"),
        ] {
            let err = submit_contact(&inbox, &events, request(name, email, message))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
            assert_eq!(err.message, format!("{} is required", field));
        }

        let err = submit_contact(&inbox, &events, request("Danny", "not-an-email", "Hi"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(inbox.received().is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_replies_after_delay() {
        let inbox = SimulatedInbox::new(Duration::from_millis(1000));
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let start = tokio::time::Instant::now();

        let receipt = submit_contact(
            &inbox,
            &events,
            request(" Danny ", "fan@example.com", "Do you ship lamps to Denver?"),
        )
        .await
        .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(
            receipt.message,
            "Thank you for your message! We will get back to you within 24-48 hours."
        );
        assert_eq!(inbox.received()[0].name, "Danny");
        assert_eq!(
            drain(&mut rx),
            vec![StorefrontEvent::Notice(Notice::success(CONTACT_SENT_MESSAGE))]
        );
    }

    #[tokio::test]
    async fn test_delivery_failure_notifies_and_keeps_request() {
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let submission = request("Danny", "fan@example.com", "Hello there");

        let err = submit_contact(&OfflineInbox, &events, submission.clone())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unavailable);
        assert_eq!(err.message, CONTACT_FAILED_MESSAGE);
        assert_eq!(
            drain(&mut rx),
            vec![StorefrontEvent::Notice(Notice::error(CONTACT_FAILED_MESSAGE))]
        );

        // The caller still owns its copy and can resubmit as-is.
        let inbox = SimulatedInbox::default();
        assert!(submit_contact(&inbox, &events, submission).await.is_ok());
    }
}
