//! Data models for the pharmacy product admin.
//!
//! These models match the backend JSON records for seamless interoperability.

mod product;

pub use product::*;
