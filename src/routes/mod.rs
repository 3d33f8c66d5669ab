//! Route tables.

mod common;
mod docs;
mod product;

pub use common::common_routes;
pub use docs::docs_routes;
pub use product::product_routes;
