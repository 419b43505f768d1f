//! Pharmacy Product Admin
//!
//! Client-side model of the product administration screen: a mirror of the
//! backend product list, the product form draft, and a filtered view over both.

pub mod admin;
pub mod api;
pub mod collection;
pub mod config;
pub mod draft;
pub mod errors;
pub mod filter;
pub mod models;
pub mod submit;

pub use admin::{Notice, NoticeLevel, ProductAdmin};
pub use api::{HttpProductApi, ProductApi};
pub use config::Config;
pub use errors::AdminError;
