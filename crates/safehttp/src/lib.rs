//! # safehttp
//!
//! Building blocks for a secure-by-default HTTP framework:
//!
//! - [`form`] – Typed accessors over parsed query and form parameters, with
//!   a last-error-wins error slot
//! - [`core`] – The closed set of HTTP status codes the framework answers with
//!
//! ## Quick Start
//!
//! ```rust
//! use safehttp::prelude::*;
//!
//! fn page_size(query: &str) -> Result<u64, StatusCode> {
//!     let mut form = Form::from_query(query).map_err(|e| e.status_code())?;
//!
//!     let size = form.uint64("size", 20);
//!     let compact = form.bool("compact", false);
//!     if let Some(err) = form.err() {
//!         return Err(err.status_code());
//!     }
//!
//!     Ok(if compact { size / 2 } else { size })
//! }
//!
//! assert_eq!(page_size("size=50&compact=true"), Ok(25));
//! assert_eq!(page_size(""), Ok(20));
//! assert_eq!(page_size("size=-1"), Err(StatusCode::BadRequest));
//! ```

#![doc(html_root_url = "https://docs.rs/safehttp/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use safehttp_core as core;

// Re-export form types
pub use safehttp_form as form;

pub use safehttp_core::StatusCode;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use safehttp::prelude::*;
/// ```
pub mod prelude {
    pub use safehttp_core::{StatusCode, UnknownStatusCode};

    pub use safehttp_form::{
        FileHeader, Form, FormConfig, FormError, FormResult, FormValue, MultipartForm,
    };
}
