//! Top-level facade crate for statsink.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use statsink_core::*;
}

pub mod agent {
    pub use statsink_agent::*;
}
