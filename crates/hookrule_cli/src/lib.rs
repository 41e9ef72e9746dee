//! HookRule CLI library exports.
//!
//! The binary in `main.rs` only parses arguments and wires these modules together.

pub mod commands;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod logging;
