// Personnel Directory - API Core
//
// This crate provides the backend API for employees, departments, and the
// history of which employee belonged to which department when.
// domains/* hold models, data types, and actions; kernel/ holds the store
// traits and their Postgres and in-memory variants.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod seed;
pub mod server;

pub use config::*;
