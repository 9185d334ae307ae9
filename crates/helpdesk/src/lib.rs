//! Top-level facade crate for helpdesk.
//!
//! Re-exports the core policies and the gateway library so users can depend on a single crate.

pub mod core {
    pub use helpdesk_core::*;
}

pub mod gateway {
    pub use helpdesk_gateway::*;
}
