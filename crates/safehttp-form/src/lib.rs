//! # safehttp Form
//!
//! Typed accessors over parsed HTTP form and query parameters.
//!
//! | Type | Source | Description |
//! |------|--------|-------------|
//! | [`Form`] | Query string, url-encoded body | Typed getters over key → values |
//! | [`MultipartForm`] | `multipart/form-data` body | [`Form`] plus uploaded [`FileHeader`]s |
//! | [`FormConfig`] | Code or TOML | Size and field-count limits |
//!
//! ## Error Slot
//!
//! Getters take a default and never return an error directly. A value that
//! fails to convert yields the default and is recorded in the form's error
//! slot; handlers check [`Form::err`] once after reading everything they
//! need. The slot keeps only the most recent failure.
//!
//! ```rust
//! use safehttp_form::Form;
//!
//! let mut form = Form::from_query("limit=10&offset=abc").unwrap();
//!
//! let limit = form.uint64("limit", 20);
//! let offset = form.uint64("offset", 0);
//! assert_eq!((limit, offset), (10, 0));
//!
//! if let Some(err) = form.err() {
//!     assert_eq!(err.key(), Some("offset"));
//!     assert_eq!(err.status_code().as_u16(), 400);
//! }
//! ```
//!
//! ## Slices
//!
//! [`Form::slice`] converts every value under a key. The element type is
//! one of the [`FormValue`] types; a single bad value clears the
//! destination.
//!
//! ```rust
//! use safehttp_form::Form;
//!
//! let mut form = Form::from_query("id=1&id=2&id=x").unwrap();
//! let mut ids: Vec<i64> = vec![];
//! form.slice(&mut ids, "id");
//!
//! assert!(ids.is_empty());
//! assert!(form.err().is_some());
//! ```

#![doc(html_root_url = "https://docs.rs/safehttp-form/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod form;
mod multipart;
mod value;

pub use config::{
    FormConfig, DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_FIELDS, DEFAULT_MAX_FIELD_SIZE,
    DEFAULT_MAX_MULTIPART_BODY_SIZE,
};
pub use error::{ConfigError, FormError, FormResult};
pub use form::Form;
pub use multipart::{FileHeader, MultipartForm};
pub use value::FormValue;
