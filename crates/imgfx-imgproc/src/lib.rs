#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// border handling for neighbourhood operations.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// the fixed bank of named filters exposed by the service.
pub mod preset;
