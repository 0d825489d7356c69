//! The pack sizer HTTP API.
//!
//! Request validation lives here: sizes and quantities are checked for
//! positivity and parseability before they reach the registry or the optimizer.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod error;
mod router;
mod server;

pub use error::Error;
pub use router::create as router;
pub use server::{serve, ServerConfig};

pub type Result<T> = std::result::Result<T, Error>;
