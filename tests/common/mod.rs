#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use order_workflow::common::errors::BackendError;
use order_workflow::common::{Order, OrderNotification, SqsEvent};
use order_workflow::ports::{
    InvocationOutcome, NotificationQueue, OrderProcessor, OrderStore, QueueMessage,
};

/// In-memory stand-in for the orders table.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Order> {
        self.orders.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put_order(&self, order: &Order) -> Result<(), BackendError> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id) {
            return Err(BackendError::Store("conditional check failed".into()));
        }
        orders.insert(order.id.clone(), order.clone());
        Ok(())
    }
}

/// In-memory queue mirroring SQS acknowledge semantics: receiving does not
/// remove a message, only deleting its handle does, and deleting an unknown
/// handle succeeds.
#[derive(Default, Clone)]
pub struct InMemoryQueue {
    messages: Arc<RwLock<VecDeque<QueueMessage>>>,
    next_handle: Arc<RwLock<usize>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_raw(&self, body: impl Into<String>) {
        let mut next_handle = self.next_handle.write().await;
        let receipt_handle = format!("handle-{}", *next_handle);
        *next_handle += 1;

        self.messages.write().await.push_back(QueueMessage {
            body: body.into(),
            receipt_handle,
        });
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn bodies(&self) -> Vec<String> {
        self.messages
            .read()
            .await
            .iter()
            .map(|message| message.body.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationQueue for InMemoryQueue {
    async fn publish(&self, notification: &OrderNotification) -> Result<(), BackendError> {
        let body = serde_json::to_string(notification)
            .map_err(|err| BackendError::Queue(err.to_string()))?;
        self.push_raw(body).await;
        Ok(())
    }

    async fn receive_one(&self) -> Result<Option<QueueMessage>, BackendError> {
        Ok(self.messages.read().await.front().cloned())
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), BackendError> {
        self.messages
            .write()
            .await
            .retain(|message| message.receipt_handle != receipt_handle);
        Ok(())
    }
}

/// Store whose writes always fail, for the 500 path.
pub struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
    async fn put_order(&self, _order: &Order) -> Result<(), BackendError> {
        Err(BackendError::Store("table unavailable".into()))
    }
}

/// Queue whose publish always fails, for the write-then-publish gap.
pub struct PublishFailingQueue;

#[async_trait]
impl NotificationQueue for PublishFailingQueue {
    async fn publish(&self, _notification: &OrderNotification) -> Result<(), BackendError> {
        Err(BackendError::Queue("queue unavailable".into()))
    }

    async fn receive_one(&self) -> Result<Option<QueueMessage>, BackendError> {
        Ok(None)
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Queue that cannot be reached at all.
pub struct UnreachableQueue;

#[async_trait]
impl NotificationQueue for UnreachableQueue {
    async fn publish(&self, _notification: &OrderNotification) -> Result<(), BackendError> {
        Err(BackendError::Queue("connection refused".into()))
    }

    async fn receive_one(&self) -> Result<Option<QueueMessage>, BackendError> {
        Err(BackendError::Queue("connection refused".into()))
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<(), BackendError> {
        Err(BackendError::Queue("connection refused".into()))
    }
}

/// Delegates to an inner queue but fails every delete, for exercising the
/// poller's tolerance of stale handles.
#[derive(Default)]
pub struct DeleteFailingQueue {
    pub inner: InMemoryQueue,
}

impl DeleteFailingQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationQueue for DeleteFailingQueue {
    async fn publish(&self, notification: &OrderNotification) -> Result<(), BackendError> {
        self.inner.publish(notification).await
    }

    async fn receive_one(&self) -> Result<Option<QueueMessage>, BackendError> {
        self.inner.receive_one().await
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<(), BackendError> {
        Err(BackendError::Queue("receipt handle has expired".into()))
    }
}

enum Script {
    Success,
    Failure(&'static str),
    Error(&'static str),
}

/// Scripted processor recording every envelope it sees.
pub struct FakeProcessor {
    script: Script,
    events: Arc<RwLock<Vec<SqsEvent>>>,
}

impl FakeProcessor {
    pub fn succeeding() -> Self {
        Self::with_script(Script::Success)
    }

    pub fn failing(reason: &'static str) -> Self {
        Self::with_script(Script::Failure(reason))
    }

    pub fn erroring(reason: &'static str) -> Self {
        Self::with_script(Script::Error(reason))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn seen(&self) -> Vec<SqsEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl OrderProcessor for FakeProcessor {
    async fn process(&self, event: &SqsEvent) -> Result<InvocationOutcome, BackendError> {
        self.events.write().await.push(event.clone());
        match self.script {
            Script::Success => Ok(InvocationOutcome::Success),
            Script::Failure(reason) => Ok(InvocationOutcome::Failure(reason.into())),
            Script::Error(reason) => Err(BackendError::Invoke(reason.into())),
        }
    }
}
