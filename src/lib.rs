#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, session-backed authentication, routing"]
#![doc = "configuration, storage layer and error handling for the taskboard API."]
#![doc = "The main binary (`main.rs`) and the schema setup binary (`bin/setup.rs`)"]
#![doc = "assemble their applications from these modules."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
