#![doc = "The `taskquery` library crate."]
#![doc = ""]
#![doc = "This crate contains the record stores for users and tasks, the natural-language"]
#![doc = "query gateway and its translator, routing configuration, and error handling."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod password;
pub mod query;
pub mod routes;
pub mod store;
pub mod translator;

pub use crate::error::AppError;
pub use crate::query::{QueryGateway, QueryOutcome};
