//! Request context types shared across layers.
//!
//! The caller's identity is resolved once per request here and then passed
//! explicitly into the workflow coordinator.

pub mod identity;

pub use identity::Caller;
