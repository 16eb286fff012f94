//! Types and rules shared between the storefront server, its database layer and its tests:
//! strongly-typed identifiers, JSON API models, the price formatter and
//! request field validation.

pub mod api_models;
pub mod ids;
pub mod policy;
pub mod price;
pub mod validation;
