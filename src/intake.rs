use lambda_http::http::StatusCode;
use lambda_http::{Request as LambdaRequest, Response as LambdaResponse};
use tracing::{error, info};

use crate::common::errors::{BackendError, Error};
use crate::common::utils::{error_response, extract_request};
use crate::common::{
    CreateOrderRequest, CreateOrderResponse, Order, OrderInput, OrderNotification,
};
use crate::ports::{NotificationQueue, OrderStore};

const ORDER_CREATED_MESSAGE: &str = "Order created successfully";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Persists a fresh order and publishes its notification. The two writes are
/// sequential with no transactional linkage: a crash after `put_order` but
/// before `publish` leaves a record with no notification. That window is an
/// accepted property of this workflow, not something this function hides.
pub async fn create_order(
    input: OrderInput,
    store: &dyn OrderStore,
    queue: &dyn NotificationQueue,
) -> Result<Order, BackendError> {
    let order = Order::create(input);

    info!("persisting order {}", order.id);
    store.put_order(&order).await?;

    info!("publishing notification for order {}", order.id);
    queue
        .publish(&OrderNotification {
            order_id: order.id.clone(),
        })
        .await?;

    Ok(order)
}

/// Full intake path: payload extraction, validation, create, response.
/// Backend failures never escape as runtime errors; they come back as a
/// generic 500 so the caller always gets a JSON response.
#[tracing::instrument(skip_all)]
pub async fn process_request(
    request: LambdaRequest,
    store: &dyn OrderStore,
    queue: &dyn NotificationQueue,
) -> Result<LambdaResponse<String>, Error> {
    let request = extract_request::<CreateOrderRequest>(request)?;

    let input = match request.validate() {
        Ok(input) => input,
        Err(err) => {
            error!("rejected order request: {err}");
            return Err(Error::HttpError(error_response(
                StatusCode::BAD_REQUEST,
                &err.to_string(),
            )?));
        }
    };

    match create_order(input, store, queue).await {
        Ok(order) => {
            let body = serde_json::to_string(&CreateOrderResponse {
                message: ORDER_CREATED_MESSAGE.into(),
                order_id: order.id,
            })?;
            let response = LambdaResponse::builder()
                .status(StatusCode::CREATED)
                .header("content-type", "application/json")
                .body(body)?;

            Ok(response)
        }
        Err(err) => {
            error!("order intake failed: {err}");
            Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE,
            )?)
        }
    }
}
