//! Run a route's validation rules before its handler.

use crate::error::AppError;
use crate::validation::{self, Flow, RequestInput, RuleSet};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::StatusCode,
};
use serde_json::Value;
use std::collections::HashMap;

/// Typed handler input that passed the rules of `R`. Rejects with 400 and the accumulated
/// field errors otherwise. Consumes the body, so it must be the last extractor.
pub struct Validated<R: RuleSet>(pub R::Output);

#[async_trait]
impl<S, R> FromRequest<S> for Validated<R>
where
    S: Send + Sync,
    R: RuleSet,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params: HashMap<String, String> = match RawPathParams::from_request_parts(&mut parts, state).await {
            Ok(raw) => raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            Err(_) => HashMap::new(),
        };
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
                _ => AppError::BadRequest(e.body_text()),
            })?;
        let input = RequestInput {
            params,
            body: parse_body(&bytes)?,
        };
        match validation::check(R::RULES, input) {
            Flow::Continue(input) => Ok(Validated(R::extract(&input)?)),
            Flow::Halt(errors) => Err(AppError::Validation(errors)),
        }
    }
}

/// Empty body reads as `{}`.
fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}
