use lambda_http::http::StatusCode;
use lambda_http::{http, Request, RequestPayloadExt, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::common::errors::Error;

const EMPTY_PAYLOAD_ERROR: &str = "Request payload is empty";

/// Deserializes the request payload, short-circuiting with a 400 response
/// when the body is empty or malformed.
pub fn extract_request<T: DeserializeOwned>(request: Request) -> Result<T, Error> {
    match request.payload::<T>() {
        Ok(Some(val)) => Ok(val),
        Ok(None) => Err(Error::HttpError(error_response(
            StatusCode::BAD_REQUEST,
            EMPTY_PAYLOAD_ERROR,
        )?)),
        Err(err) => Err(Error::HttpError(error_response(
            StatusCode::BAD_REQUEST,
            &err.to_string(),
        )?)),
    }
}

/// JSON error body in the shape every handler response uses.
pub fn error_response(status: StatusCode, message: &str) -> Result<Response<String>, http::Error> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(json!({ "message": message }).to_string())
}
