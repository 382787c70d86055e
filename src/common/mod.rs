pub mod errors;
pub mod utils;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::common::errors::ValidationError;

pub const TABLE_NAME: &str = "Pedidos";
pub const QUEUE_NAME: &str = "FilaDePedidos";
pub const PROCESSOR_FUNCTION_NAME: &str = "processar-pedido";

const ENDPOINT_URL_DEFAULT: &str = "http://localstack:4566";
const REGION_DEFAULT: &str = "us-east-1";

/// Endpoint and region come from the environment so the same binaries run
/// against LocalStack and a real account. Resource names are fixed.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint_url: String,
    pub region: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("ENDPOINT_URL").unwrap_or(ENDPOINT_URL_DEFAULT.into()),
            region: std::env::var("AWS_DEFAULT_REGION").unwrap_or(REGION_DEFAULT.into()),
        }
    }

    pub fn queue_url(&self) -> String {
        format!("{}/000000000000/{}", self.endpoint_url, QUEUE_NAME)
    }

    pub async fn sdk_config(&self) -> aws_config::SdkConfig {
        aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&self.endpoint_url)
            .region(aws_config::Region::new(self.region.clone()))
            .load()
            .await
    }
}

/// Order lifecycle status. Only the initial state is written here; later
/// transitions belong to the downstream processing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PENDENTE")]
    Pendente,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "PENDENTE",
        }
    }
}

/// Validated order fields, before an id has been assigned.
#[derive(Debug, Clone)]
pub struct OrderInput {
    pub cliente: String,
    pub itens: Value,
    pub mesa: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub cliente: String,
    pub itens: Value,
    pub mesa: Value,
    pub status: OrderStatus,
}

impl Order {
    /// Builds a fresh order with a server-generated id and the initial status.
    pub fn create(input: OrderInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            cliente: input.cliente,
            itens: input.itens,
            mesa: input.mesa,
            status: OrderStatus::Pendente,
        }
    }
}

impl From<&Order> for HashMap<String, AttributeValue> {
    fn from(order: &Order) -> Self {
        HashMap::from([
            ("id".into(), AttributeValue::S(order.id.clone())),
            ("cliente".into(), AttributeValue::S(order.cliente.clone())),
            ("itens".into(), json_to_attribute(&order.itens)),
            ("mesa".into(), json_to_attribute(&order.mesa)),
            ("status".into(), AttributeValue::S(order.status.as_str().into())),
        ])
    }
}

/// Maps arbitrary JSON onto native DynamoDB attribute values so `itens` and
/// `mesa` keep their structure in the table.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, val)| (key.clone(), json_to_attribute(val)))
                .collect(),
        ),
    }
}

/// Inbound intake payload. Fields are optional at the serde level so that a
/// missing key and a present-but-empty value produce the same validation
/// error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub itens: Option<Value>,
    #[serde(default)]
    pub mesa: Option<Value>,
}

impl CreateOrderRequest {
    /// All three fields must be present, non-null and non-empty.
    pub fn validate(self) -> Result<OrderInput, ValidationError> {
        let cliente = self.cliente.filter(|cliente| !cliente.is_empty());
        let itens = self.itens.filter(|itens| !value_is_empty(itens));
        let mesa = self.mesa.filter(|mesa| !value_is_empty(mesa));

        match (cliente, itens, mesa) {
            (Some(cliente), Some(itens), Some(mesa)) => Ok(OrderInput {
                cliente,
                itens,
                mesa,
            }),
            (cliente, itens, mesa) => {
                let mut fields = Vec::new();
                if cliente.is_none() {
                    fields.push("cliente");
                }
                if itens.is_none() {
                    fields.push("itens");
                }
                if mesa.is_none() {
                    fields.push("mesa");
                }
                Err(ValidationError { fields })
            }
        }
    }
}

/// Null, empty string and empty array all count as absent.
fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order_id: String,
}

/// Queue message published per accepted order; carries only the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNotification {
    pub order_id: String,
}

/// Batch-record envelope handed to the downstream processor, shaped like an
/// SQS event so the same function works behind a real event source mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqsEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SqsRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqsRecord {
    pub body: String,
}

impl SqsEvent {
    /// One-record envelope: the poller forwards a single message at a time.
    pub fn single(body: impl Into<String>) -> Self {
        Self {
            records: vec![SqsRecord { body: body.into() }],
        }
    }
}
