use tracing::{error, info, warn};

use crate::common::errors::BackendError;
use crate::common::SqsEvent;
use crate::ports::{InvocationOutcome, NotificationQueue, OrderProcessor};

/// What a single poll cycle did. The caller maps this onto an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing waiting; distinct from failure.
    QueueEmpty,
    /// One message processed and acknowledged.
    Processed,
    /// Downstream processing failed; the message stays queued and becomes
    /// visible again under the queue's own redelivery policy.
    ProcessingFailed,
}

/// Runs one receive/invoke/acknowledge cycle. At most one message is handled
/// per call. Failure to reach the queue on receive bubbles up; everything
/// after that is reported through the outcome.
pub async fn poll_once(
    queue: &dyn NotificationQueue,
    processor: &dyn OrderProcessor,
) -> Result<CycleOutcome, BackendError> {
    info!("checking the queue for pending orders");
    let Some(message) = queue.receive_one().await? else {
        info!("queue is empty, nothing to process");
        return Ok(CycleOutcome::QueueEmpty);
    };

    info!("processing order notification: {}", message.body);
    let event = SqsEvent::single(message.body);

    match processor.process(&event).await {
        Ok(InvocationOutcome::Success) => {
            info!("processor reported success, acknowledging message");
            if let Err(err) = queue.delete(&message.receipt_handle).await {
                warn!("could not delete message (handle may be stale): {err}");
            }
            Ok(CycleOutcome::Processed)
        }
        Ok(InvocationOutcome::Failure(reason)) => {
            error!("processor reported failure, leaving message queued: {reason}");
            Ok(CycleOutcome::ProcessingFailed)
        }
        Err(err) => {
            error!("could not invoke processor, leaving message queued: {err}");
            Ok(CycleOutcome::ProcessingFailed)
        }
    }
}
