use lambda_http::{run, service_fn, Error as LambdaError, Request as LambdaRequest};

use order_workflow::aws::{DynamoOrderStore, SqsNotificationQueue};
use order_workflow::common::errors::Error;
use order_workflow::common::{Config, TABLE_NAME};
use order_workflow::intake::process_request;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();

    let config = Config::from_env();
    let sdk_config = config.sdk_config().await;
    let store = DynamoOrderStore::new(aws_sdk_dynamodb::Client::new(&sdk_config), TABLE_NAME);
    let queue =
        SqsNotificationQueue::new(aws_sdk_sqs::Client::new(&sdk_config), config.queue_url());

    run(service_fn(|request: LambdaRequest| async {
        let result = process_request(request, &store, &queue).await;

        match result {
            Ok(val) => Ok(val),
            Err(Error::HttpError(val)) => Ok(val),
            Err(Error::LambdaError(err)) => Err(err),
        }
    }))
    .await
}
