//! Queue-backed dispatcher running deliveries on background workers.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};
use log::{debug, error};

use crate::model::review::ReviewId;
use crate::notify::channel::{DeliveryChannel, Notification};

/// Hands notifications to background workers and returns immediately.
///
/// Dropping the dispatcher closes the queue, lets the workers drain every
/// already-accepted item, and joins them before returning.
pub struct NotificationDispatcher {
    sender: Option<Sender<Notification>>,
    workers: Vec<JoinHandle<()>>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher with a single delivery worker.
    pub fn new(channel: impl DeliveryChannel + 'static) -> Self {
        Self::with_workers(channel, 1)
    }

    /// Creates a dispatcher draining the queue with `worker_count` workers.
    ///
    /// The count is clamped to at least one. Items carry no ordering
    /// dependency on each other, so any worker may take any item.
    pub fn with_workers(channel: impl DeliveryChannel + 'static, worker_count: usize) -> Self {
        let (sender, receiver) = unbounded::<Notification>();
        let channel: Arc<dyn DeliveryChannel> = Arc::new(channel);
        let workers = (0..worker_count.max(1))
            .map(|_| spawn_worker(receiver.clone(), Arc::clone(&channel)))
            .collect();
        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// Queues one confirmation and returns without waiting for delivery.
    ///
    /// The outcome of the delivery is never reported back to the caller; a
    /// fault inside the work item stays inside the dispatcher.
    pub fn enqueue(&self, review_id: ReviewId, recipient: impl Into<String>) {
        let item = Notification {
            review_id,
            recipient: recipient.into(),
        };
        let accepted = match self.sender.as_ref() {
            Some(sender) => sender.send(item).is_ok(),
            None => false,
        };
        if !accepted {
            error!(
                "event=notify_enqueue module=notify status=error review_id={review_id} error=queue_closed"
            );
        }
    }
}

impl Drop for NotificationDispatcher {
    fn drop(&mut self) {
        // Dropping the sender disconnects the queue; workers finish the
        // items already accepted and then exit.
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn spawn_worker(
    receiver: Receiver<Notification>,
    channel: Arc<dyn DeliveryChannel>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(item) = receiver.recv() {
            match channel.deliver(&item) {
                Ok(()) => {
                    debug!(
                        "event=notify_dispatch module=notify status=ok review_id={}",
                        item.review_id
                    );
                }
                Err(err) => {
                    error!(
                        "event=notify_dispatch module=notify status=error review_id={} error={}",
                        item.review_id, err
                    );
                }
            }
        }
    })
}
