//! Delivery channel contract and the built-in email-log channel.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::info;

use crate::model::review::ReviewId;

/// One dispatch item: a confirmation for a created review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Review the confirmation refers to.
    pub review_id: ReviewId,
    /// Recipient identifier the confirmation is addressed to.
    pub recipient: String,
}

/// Failure reported by a delivery channel for a single notification.
///
/// The dispatcher consumes this at the worker boundary; it never reaches the
/// request that enqueued the notification.
#[derive(Debug)]
pub struct DeliveryError {
    message: String,
}

impl DeliveryError {
    /// Creates a delivery error carrying a human-readable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "delivery failed: {}", self.message)
    }
}

impl Error for DeliveryError {}

/// Transport that executes one notification delivery.
pub trait DeliveryChannel: Send + Sync {
    /// Delivers one notification, or reports why it could not.
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// Default channel: renders the confirmation email as one structured log
/// line per notification instead of talking to a mail relay.
#[derive(Debug, Default)]
pub struct EmailLogChannel;

impl DeliveryChannel for EmailLogChannel {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        info!(
            "event=notify_email module=notify status=ok review_id={} recipient={}",
            notification.review_id, notification.recipient
        );
        Ok(())
    }
}
