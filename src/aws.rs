use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use tracing::info;

use crate::common::errors::BackendError;
use crate::common::{Order, OrderNotification, SqsEvent};
use crate::ports::{
    InvocationOutcome, NotificationQueue, OrderProcessor, OrderStore, QueueMessage,
};

/// Short poll on receive, long enough to catch a just-published message.
const RECEIVE_WAIT_TIME_SECONDS: i32 = 2;

pub struct DynamoOrderStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoOrderStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl OrderStore for DynamoOrderStore {
    async fn put_order(&self, order: &Order) -> Result<(), BackendError> {
        let item: HashMap<String, AttributeValue> = order.into();
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            // Ids are generated server-side; a collision is a bug, not a retry.
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|err| BackendError::Store(DisplayErrorContext(err).to_string()))?;
        Ok(())
    }
}

pub struct SqsNotificationQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsNotificationQueue {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl NotificationQueue for SqsNotificationQueue {
    async fn publish(&self, notification: &OrderNotification) -> Result<(), BackendError> {
        let body = serde_json::to_string(notification)
            .map_err(|err| BackendError::Queue(err.to_string()))?;

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|err| BackendError::Queue(DisplayErrorContext(err).to_string()))?;

        info!(
            "notification sent to queue: {}",
            output.message_id().unwrap_or("empty_id")
        );
        Ok(())
    }

    async fn receive_one(&self) -> Result<Option<QueueMessage>, BackendError> {
        let response = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(RECEIVE_WAIT_TIME_SECONDS)
            .send()
            .await
            .map_err(|err| BackendError::Queue(DisplayErrorContext(err).to_string()))?;

        let message = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .find_map(|message| match (message.body, message.receipt_handle) {
                (Some(body), Some(receipt_handle)) => Some(QueueMessage {
                    body,
                    receipt_handle,
                }),
                _ => None,
            });

        Ok(message)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), BackendError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|err| BackendError::Queue(DisplayErrorContext(err).to_string()))?;
        Ok(())
    }
}

pub struct LambdaOrderProcessor {
    client: aws_sdk_lambda::Client,
    function_name: String,
}

impl LambdaOrderProcessor {
    pub fn new(client: aws_sdk_lambda::Client, function_name: impl Into<String>) -> Self {
        Self {
            client,
            function_name: function_name.into(),
        }
    }
}

#[async_trait]
impl OrderProcessor for LambdaOrderProcessor {
    async fn process(&self, event: &SqsEvent) -> Result<InvocationOutcome, BackendError> {
        let payload =
            serde_json::to_vec(event).map_err(|err| BackendError::Invoke(err.to_string()))?;

        let output = self
            .client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|err| BackendError::Invoke(DisplayErrorContext(err).to_string()))?;

        // A synchronous invoke can report 200 while the function itself
        // raised; both the status code and the function error count here.
        if let Some(function_error) = output.function_error() {
            return Ok(InvocationOutcome::Failure(format!(
                "function error: {function_error}"
            )));
        }
        match output.status_code() {
            200 => Ok(InvocationOutcome::Success),
            status => Ok(InvocationOutcome::Failure(format!("status code {status}"))),
        }
    }
}
