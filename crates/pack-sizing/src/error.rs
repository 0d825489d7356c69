use crate::PackSize;

/// Errors raised while validating or mutating pack sizes and order quantities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A submitted pack size is zero or negative
    #[error("pack size must be a positive integer, got {0}")]
    InvalidPackSize(i64),
    /// A submitted pack size is larger than the service accepts
    #[error("pack size {size} exceeds the maximum of {max}")]
    PackSizeTooLarge { size: PackSize, max: u64 },
    /// The pack size to replace is not in the registry
    #[error("pack size {0} does not exist")]
    NotFound(PackSize),
    /// The pack size to introduce is already in the registry
    #[error("pack size {0} already exists")]
    Conflict(PackSize),
    /// A requested order quantity is non-positive, malformed or too large
    #[error("invalid order quantity: {0}")]
    InvalidQuantity(String),
}
