//! TalkTemplate Core - Core data structures and shared infrastructure
//!
//! This crate defines the types, error handling, configuration, and
//! capability traits shared by the TalkTemplate client stack.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
