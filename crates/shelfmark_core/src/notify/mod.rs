//! Fire-and-forget notification dispatch.
//!
//! # Responsibility
//! - Queue one confirmation notification per created review.
//! - Execute deliveries outside the request's critical path.
//!
//! # Invariants
//! - Enqueue is non-blocking and never fails the calling request.
//! - Work-item faults are logged at the worker boundary, never re-raised.
//! - Best effort only: no retry, no cross-item ordering, no persistence of
//!   pending items across a process restart.

mod channel;
mod dispatcher;

pub use channel::{DeliveryChannel, DeliveryError, EmailLogChannel, Notification};
pub use dispatcher::NotificationDispatcher;
