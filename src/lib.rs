#![doc = "The `ticklist` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, data access layer, routing configuration, and error handling for"]
#![doc = "the ticklist to-do backend. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application, and by the integration tests to build"]
#![doc = "an identical in-process app."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
