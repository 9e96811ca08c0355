//! HTTP inbound adapter exposing the JSON API.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod expenses;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
