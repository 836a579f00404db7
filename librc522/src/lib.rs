// librc522-rs/librc522/src/lib.rs

//! librc522
//!
//! Pure Rust driver for MFRC522 contactless reader modules.
#![warn(missing_docs)]

pub mod constants;
pub mod device;
pub mod error;
pub mod picc;
pub mod prelude;
pub mod records;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
