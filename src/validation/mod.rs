//! Declarative request validation.
//!
//! A route declares an ordered list of [`Rule`]s. [`check`] runs every check of
//! every rule against the request's path parameters and body, accumulating one
//! [`FieldError`] per failed check, and yields [`Flow::Continue`] when nothing
//! failed or [`Flow::Halt`] with the collected errors otherwise.

mod product;

pub use product::{ById, CreateProduct, UpdateProduct, AVAILABILITY, ID, NAME, PRICE};

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use utoipa::ToSchema;

/// Where a validated field lives in the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// One failed check.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(path: &str, location: Location, value: Option<Value>, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }
}

/// A single predicate over a field value. `None` means the field is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Text form is an optionally signed run of digits that fits an `i64`.
    IsInt,
    /// Text form is not empty.
    NotEmpty,
    /// Text form is a decimal number.
    IsNumeric,
    /// Loosely compares greater than zero: numbers and numeric strings by value, booleans as 1/0.
    GreaterThanZero,
    /// Value is a JSON boolean.
    IsBoolean,
}

impl Check {
    pub fn passes(self, value: Option<&Value>) -> bool {
        match self {
            Check::IsInt => text_of(value).parse::<i64>().is_ok(),
            Check::NotEmpty => !text_of(value).is_empty(),
            Check::IsNumeric => numeric_pattern().is_match(&text_of(value)),
            Check::GreaterThanZero => loose_number(value).is_some_and(|n| n > 0.0),
            Check::IsBoolean => matches!(value, Some(Value::Bool(_))),
        }
    }
}

/// Checks to run on one field, each paired with the message reported when it fails.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub field: &'static str,
    pub location: Location,
    /// Skip all checks when the field is absent.
    pub optional: bool,
    pub checks: &'static [(Check, &'static str)],
}

/// Raw request input visible to validation.
#[derive(Clone, Debug, Default)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: Value,
}

impl RequestInput {
    pub fn field(&self, field: &str, location: Location) -> Option<Value> {
        match location {
            Location::Params => self.params.get(field).map(|s| Value::String(s.clone())),
            Location::Body => self.body.get(field).cloned(),
        }
    }
}

/// Outcome of a pipeline step.
#[derive(Debug)]
pub enum Flow<T> {
    Continue(T),
    Halt(Vec<FieldError>),
}

/// Run `rules` in order over `input`.
pub fn check(rules: &[Rule], input: RequestInput) -> Flow<RequestInput> {
    let mut errors = Vec::new();
    for rule in rules {
        let value = input.field(rule.field, rule.location);
        if rule.optional && value.is_none() {
            continue;
        }
        for (check, msg) in rule.checks {
            if !check.passes(value.as_ref()) {
                errors.push(FieldError::new(rule.field, rule.location, value.clone(), msg));
            }
        }
    }
    if errors.is_empty() {
        Flow::Continue(input)
    } else {
        tracing::debug!(errors = errors.len(), "request rejected by validation");
        Flow::Halt(errors)
    }
}

/// A route's rules plus the conversion from validated input into the handler's typed input.
pub trait RuleSet: Send + Sync + 'static {
    type Output: Send;

    const RULES: &'static [Rule];

    fn extract(input: &RequestInput) -> Result<Self::Output, crate::error::AppError>;
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?([0-9]*\.)?[0-9]+$").expect("numeric pattern compiles"))
}

/// Text form of a value; absent and null are empty.
pub(crate) fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Numeric reading of a value for loose comparisons. `None` for anything not comparable.
pub(crate) fn loose_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}
