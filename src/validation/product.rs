//! Rules for the product routes.

use super::{loose_number, text_of, Check, Location, RequestInput, Rule, RuleSet};
use crate::error::AppError;
use crate::model::{NewProduct, ProductUpdate};

pub const ID: Rule = Rule {
    field: "id",
    location: Location::Params,
    optional: false,
    checks: &[(Check::IsInt, "Invalid id")],
};

pub const NAME: Rule = Rule {
    field: "name",
    location: Location::Body,
    optional: false,
    checks: &[(Check::NotEmpty, "Product name cannot be empty")],
};

pub const PRICE: Rule = Rule {
    field: "price",
    location: Location::Body,
    optional: false,
    checks: &[
        (Check::IsNumeric, "Invalid value"),
        (Check::NotEmpty, "Product price cannot be empty"),
        (Check::GreaterThanZero, "Invalid price"),
    ],
};

pub const AVAILABILITY: Rule = Rule {
    field: "availability",
    location: Location::Body,
    optional: true,
    checks: &[(Check::IsBoolean, "Invalid availability")],
};

/// `GET`, `PATCH` and `DELETE /:id`.
pub struct ById;

/// `POST /`.
pub struct CreateProduct;

/// `PUT /:id`.
pub struct UpdateProduct;

impl RuleSet for ById {
    type Output = i64;

    const RULES: &'static [Rule] = &[ID];

    fn extract(input: &RequestInput) -> Result<i64, AppError> {
        id_param(input)
    }
}

impl RuleSet for CreateProduct {
    type Output = NewProduct;

    const RULES: &'static [Rule] = &[NAME, PRICE];

    fn extract(input: &RequestInput) -> Result<NewProduct, AppError> {
        Ok(NewProduct {
            name: name_field(input),
            price: price_field(input)?,
        })
    }
}

impl RuleSet for UpdateProduct {
    type Output = (i64, ProductUpdate);

    const RULES: &'static [Rule] = &[ID, NAME, PRICE, AVAILABILITY];

    fn extract(input: &RequestInput) -> Result<(i64, ProductUpdate), AppError> {
        let id = id_param(input)?;
        let update = ProductUpdate {
            name: name_field(input),
            price: price_field(input)?,
            availability: input.body.get("availability").and_then(|v| v.as_bool()),
        };
        Ok((id, update))
    }
}

fn id_param(input: &RequestInput) -> Result<i64, AppError> {
    input
        .params
        .get("id")
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))
}

fn name_field(input: &RequestInput) -> String {
    text_of(input.body.get("name"))
}

fn price_field(input: &RequestInput) -> Result<f64, AppError> {
    loose_number(input.body.get("price"))
        .filter(|p| *p > 0.0)
        .ok_or_else(|| AppError::BadRequest("invalid price".into()))
}
