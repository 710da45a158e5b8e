//! Core types for larder
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: error type hierarchy and the `Result` alias
//! - Timestamp: millisecond-precision wall-clock time

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod timestamp;

pub use error::{Error, Result};
pub use timestamp::Timestamp;
