use std::process::ExitCode;

use tracing::{error, info};

use order_workflow::aws::{LambdaOrderProcessor, SqsNotificationQueue};
use order_workflow::common::{Config, PROCESSOR_FUNCTION_NAME};
use order_workflow::poller::{poll_once, CycleOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = Config::from_env();
    info!("connecting to {}", config.endpoint_url);

    let sdk_config = config.sdk_config().await;
    let queue =
        SqsNotificationQueue::new(aws_sdk_sqs::Client::new(&sdk_config), config.queue_url());
    let processor = LambdaOrderProcessor::new(
        aws_sdk_lambda::Client::new(&sdk_config),
        PROCESSOR_FUNCTION_NAME,
    );

    // One cycle per run; repeating is the scheduler's job.
    match poll_once(&queue, &processor).await {
        Ok(CycleOutcome::QueueEmpty) | Ok(CycleOutcome::Processed) => ExitCode::SUCCESS,
        Ok(CycleOutcome::ProcessingFailed) => ExitCode::FAILURE,
        Err(err) => {
            error!("could not reach the queue: {err}");
            ExitCode::FAILURE
        }
    }
}
