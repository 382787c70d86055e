use async_trait::async_trait;

use crate::common::errors::BackendError;
use crate::common::{Order, OrderNotification, SqsEvent};

/// Key-value table holding order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn put_order(&self, order: &Order) -> Result<(), BackendError>;
}

/// A message received from the queue, with the delivery handle needed to
/// acknowledge it later.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueMessage {
    pub body: String,
    pub receipt_handle: String,
}

/// Queue decoupling order intake from order processing.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    async fn publish(&self, notification: &OrderNotification) -> Result<(), BackendError>;

    /// Fetches at most one message, waiting briefly if the queue is empty.
    async fn receive_one(&self) -> Result<Option<QueueMessage>, BackendError>;

    /// Acknowledges a message. Deleting an already-gone handle is not an
    /// error at the SQS level, and implementations keep it that way.
    async fn delete(&self, receipt_handle: &str) -> Result<(), BackendError>;
}

/// Outcome reported by the downstream processing function.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    Success,
    Failure(String),
}

/// The external function that actually processes an order.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn process(&self, event: &SqsEvent) -> Result<InvocationOutcome, BackendError>;
}
