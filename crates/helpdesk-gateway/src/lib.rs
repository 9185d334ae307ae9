//! helpdesk gateway library entry.
//!
//! This crate wires configuration, identity resolution, the persistence
//! collaborator, the workflow coordinator, and the HTTP surface into one
//! service. It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod http;
pub mod obs;
pub mod ops;
pub mod store;
pub mod workflow;
