//! Typed access to parsed form and query parameters.
//!
//! A [`Form`] holds the values submitted under each parameter key and a
//! single error slot. Getters never fail loudly: a value that cannot be
//! converted yields the caller's default and the failure is stored in the
//! slot, which handlers inspect with [`Form::err`] after a batch of reads.
//! Only the most recent failure is kept.

use crate::{FormConfig, FormError, FormResult, FormValue};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;

/// Parsed data from a URL query or a non-multipart form body.
///
/// Values are only reachable through the typed getters. Multiple values per
/// key are preserved in the order they were received; scalar getters read
/// the first one.
///
/// # Example
///
/// ```rust
/// use safehttp_form::Form;
///
/// let mut form = Form::from_query("page=2&tag=rust&tag=http&debug=maybe").unwrap();
///
/// assert_eq!(form.int64("page", 1), 2);
/// assert_eq!(form.uint64("limit", 20), 20);
/// assert!(form.err().is_none());
///
/// let mut tags: Vec<String> = Vec::new();
/// form.slice(&mut tags, "tag");
/// assert_eq!(tags, ["rust", "http"]);
///
/// assert!(!form.bool("debug", false));
/// assert!(form.err().is_some());
/// ```
#[derive(Debug, Default)]
pub struct Form {
    values: IndexMap<String, Vec<String>>,
    err: Option<FormError>,
}

impl Form {
    /// Creates a form from an already-parsed key to values mapping.
    ///
    /// Keys without any value are dropped, so a present key always has a
    /// first value.
    #[must_use]
    pub fn new(values: IndexMap<String, Vec<String>>) -> Self {
        let values = values
            .into_iter()
            .filter(|(_, vals)| !vals.is_empty())
            .collect();
        Self { values, err: None }
    }

    /// Parses a URL query string (without the leading `?`).
    pub fn from_query(query: &str) -> FormResult<Self> {
        Ok(decode_pairs(query)?.into_iter().collect())
    }

    /// Parses an `application/x-www-form-urlencoded` request body.
    pub fn from_urlencoded(body: &[u8], config: &FormConfig) -> FormResult<Self> {
        if body.len() > config.max_body_size {
            tracing::warn!(
                max = config.max_body_size,
                actual = body.len(),
                "form body exceeds size limit"
            );
            return Err(FormError::PayloadTooLarge {
                max: config.max_body_size,
                actual: body.len(),
            });
        }

        let body = std::str::from_utf8(body)
            .map_err(|e| FormError::InvalidEncoding(format!("invalid UTF-8: {e}")))?;
        let pairs = decode_pairs(body)?;

        if pairs.len() > config.max_fields {
            tracing::warn!(
                max = config.max_fields,
                actual = pairs.len(),
                "form body exceeds field limit"
            );
            return Err(FormError::TooManyFields {
                max: config.max_fields,
            });
        }

        Ok(pairs.into_iter().collect())
    }

    /// Returns the first value under `key` as a signed 64-bit integer.
    ///
    /// Returns `default` if the key is absent. If the value is not an
    /// integer, returns `default` and records the error.
    pub fn int64(&mut self, key: &str, default: i64) -> i64 {
        self.scalar(key, default)
    }

    /// Returns the first value under `key` as an unsigned 64-bit integer.
    ///
    /// Returns `default` if the key is absent. If the value is not an
    /// unsigned integer, returns `default` and records the error.
    pub fn uint64(&mut self, key: &str, default: u64) -> u64 {
        self.scalar(key, default)
    }

    /// Returns the first value under `key` as a 64-bit float.
    ///
    /// Returns `default` if the key is absent. If the value is not a float,
    /// returns `default` and records the error.
    pub fn float64(&mut self, key: &str, default: f64) -> f64 {
        self.scalar(key, default)
    }

    /// Returns the first value under `key`, or `default` if the key is absent.
    pub fn string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.first(key).unwrap_or(default)
    }

    /// Returns the first value under `key` as a boolean.
    ///
    /// Only `true` and `false` are accepted. Returns `default` if the key is
    /// absent; any other token returns `default` and records the error.
    pub fn bool(&mut self, key: &str, default: bool) -> bool {
        self.scalar(key, default)
    }

    /// Converts every value under `key` into `dest`.
    ///
    /// If the key is absent, `dest` is cleared and the error slot is reset.
    /// If any value fails to convert, `dest` is cleared, the error is
    /// recorded, and no partial result is kept.
    pub fn slice<T: FormValue>(&mut self, dest: &mut Vec<T>, key: &str) {
        let Some(raw) = self.values.get(key) else {
            dest.clear();
            self.err = None;
            return;
        };

        let parsed = raw
            .iter()
            .map(|value| T::from_param(key, value))
            .collect::<FormResult<Vec<T>>>();

        match parsed {
            Ok(values) => *dest = values,
            Err(err) => {
                dest.clear();
                self.record(err);
            }
        }
    }

    /// Like [`Form::slice`], with the element type chosen at runtime.
    ///
    /// `dest` must be a `Vec` of `String`, `i64`, `u64`, `f64` or `bool`.
    /// Any other type records [`FormError::UnsupportedType`] and leaves
    /// `dest` untouched.
    pub fn slice_any<D: Any>(&mut self, dest: &mut D, key: &str) {
        let dest: &mut dyn Any = dest;

        if let Some(dest) = dest.downcast_mut::<Vec<String>>() {
            self.slice(dest, key);
        } else if let Some(dest) = dest.downcast_mut::<Vec<i64>>() {
            self.slice(dest, key);
        } else if let Some(dest) = dest.downcast_mut::<Vec<u64>>() {
            self.slice(dest, key);
        } else if let Some(dest) = dest.downcast_mut::<Vec<f64>>() {
            self.slice(dest, key);
        } else if let Some(dest) = dest.downcast_mut::<Vec<bool>>() {
            self.slice(dest, key);
        } else {
            self.record(FormError::UnsupportedType {
                type_name: std::any::type_name::<D>(),
            });
        }
    }

    /// Returns the first value under `key` converted to `T`.
    ///
    /// Unlike the defaulting getters this does not touch the error slot.
    pub fn value<T: FormValue>(&self, key: &str) -> FormResult<Option<T>> {
        self.first(key)
            .map(|raw| T::from_param(key, raw))
            .transpose()
    }

    /// Returns the most recent conversion error, if any.
    #[must_use]
    pub fn err(&self) -> Option<&FormError> {
        self.err.as_ref()
    }

    /// Returns the most recent conversion error and clears the slot.
    pub fn take_err(&mut self) -> Option<FormError> {
        self.err.take()
    }

    /// Returns all raw values under `key`, empty if the key is absent.
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if at least one value was submitted under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the parameter keys in the order they were first seen.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the form has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|vals| vals.first())
            .map(String::as_str)
    }

    fn scalar<T: FormValue>(&mut self, key: &str, default: T) -> T {
        match self.value(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                self.record(err);
                default
            }
        }
    }

    fn record(&mut self, err: FormError) {
        tracing::debug!(
            key = err.key().unwrap_or_default(),
            error = %err,
            "form value conversion failed"
        );
        self.err = Some(err);
    }
}

/// Decodes `key=value` pairs, rejecting percent-escapes that are not UTF-8.
fn decode_pairs(input: &str) -> FormResult<Vec<(String, String)>> {
    // Decoding is lossy; a replacement character the input did not carry
    // comes from an invalid escape.
    let input_has_replacement = input.contains(char::REPLACEMENT_CHARACTER);

    form_urlencoded::parse(input.as_bytes())
        .map(|(key, value)| {
            if !input_has_replacement
                && (key.contains(char::REPLACEMENT_CHARACTER)
                    || value.contains(char::REPLACEMENT_CHARACTER))
            {
                return Err(FormError::InvalidEncoding(format!(
                    "parameter {key:?} contains a percent-escape that is not valid UTF-8"
                )));
            }
            Ok((key.into_owned(), value.into_owned()))
        })
        .collect()
}

impl<K, V> FromIterator<(K, V)> for Form
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in iter {
            values.entry(key.into()).or_default().push(value.into());
        }
        Self { values, err: None }
    }
}

impl From<IndexMap<String, Vec<String>>> for Form {
    fn from(values: IndexMap<String, Vec<String>>) -> Self {
        Self::new(values)
    }
}

impl From<HashMap<String, Vec<String>>> for Form {
    fn from(values: HashMap<String, Vec<String>>) -> Self {
        Self::new(values.into_iter().collect())
    }
}
