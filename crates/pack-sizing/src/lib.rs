//! Pack sizing: choosing which packs to ship for an order.
//!
//! The crate has two halves. [`PackSizeRegistry`] holds the set of pack sizes a
//! warehouse can ship and guards it for concurrent readers and writers.
//! [`optimize`] takes an order quantity and a snapshot of that set and returns the
//! [`PackBreakdown`] that never under-ships, ships as few items as possible and,
//! among those, uses the fewest packs.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod breakdown;
mod error;
mod optimizer;
mod registry;
mod size;

pub use breakdown::PackBreakdown;
pub use error::Error;
pub use optimizer::optimize;
pub use registry::{PackSizeRegistry, DEFAULT_PACK_SIZES};
pub use size::PackSize;

pub type Result<T> = std::result::Result<T, Error>;
