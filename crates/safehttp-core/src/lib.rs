//! # safehttp Core
//!
//! Core types shared by the safehttp crates.
//!
//! - [`StatusCode`] - The closed set of HTTP status codes the framework answers with
//! - [`UnknownStatusCode`] - Error for numeric codes outside that set

#![doc(html_root_url = "https://docs.rs/safehttp-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod status;

pub use status::{StatusCode, UnknownStatusCode};
