//! # Netdir Common
//!
//! Types shared by every crate in the workspace:
//!
//! * **[`network`]**: the network object value types stored in the directory.
//! * **[`config`]**: runtime settings for the directory and its refresh cycle.
//! * **[`error`]**: error enums for the few fallible operations.
//! * **[`log`]**: logging macros forwarding to `tracing`.

pub mod config;
pub mod error;
pub mod log;
pub mod network;

#[doc(hidden)]
pub use tracing;
