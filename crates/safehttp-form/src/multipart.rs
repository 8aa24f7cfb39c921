//! Multipart form data.
//!
//! [`MultipartForm`] extends [`Form`] with the file parts of a
//! `multipart/form-data` body. Text parts are exposed through the usual
//! [`Form`] getters; file parts are kept as [`FileHeader`] metadata.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use http::{header, HeaderMap, HeaderValue};
//! use safehttp_form::{FormConfig, MultipartForm};
//!
//! # tokio_test_block(async {
//! let body = "--XyZ\r\n\
//!     Content-Disposition: form-data; name=\"count\"\r\n\r\n\
//!     3\r\n\
//!     --XyZ\r\n\
//!     Content-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"\r\n\
//!     Content-Type: text/plain\r\n\r\n\
//!     hello\r\n\
//!     --XyZ--\r\n";
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(
//!     header::CONTENT_TYPE,
//!     HeaderValue::from_static("multipart/form-data; boundary=XyZ"),
//! );
//!
//! let mut form = MultipartForm::parse(&headers, Bytes::from(body), &FormConfig::default())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(form.int64("count", 0), 3);
//! assert_eq!(form.file("doc").unwrap().file_name(), "a.txt");
//! assert_eq!(form.file("doc").unwrap().size(), 5);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use crate::{Form, FormConfig, FormError, FormResult};
use bytes::Bytes;
use http::{header, HeaderMap};
use indexmap::IndexMap;
use std::io;
use std::ops::{Deref, DerefMut};

/// Metadata of one uploaded file part.
///
/// Holds what the client declared about the file, not its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    file_name: String,
    content_type: Option<mime::Mime>,
    headers: HeaderMap,
    size: usize,
}

impl FileHeader {
    /// Creates a file header with the given file name and size.
    #[must_use]
    pub fn new(file_name: impl Into<String>, size: usize) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            headers: HeaderMap::new(),
            size,
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: mime::Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Sets the raw part headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Returns the file name sent by the client.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the declared content type of the part.
    #[must_use]
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.content_type.as_ref()
    }

    /// Returns the raw part headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the size of the part body in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// A parsed `multipart/form-data` request body.
///
/// Dereferences to [`Form`] for the text fields, so every typed getter and
/// the error slot work the same way as for url-encoded forms.
#[derive(Debug, Default)]
pub struct MultipartForm {
    form: Form,
    files: IndexMap<String, Vec<FileHeader>>,
}

impl MultipartForm {
    /// Creates a multipart form from parsed text fields and file parts.
    #[must_use]
    pub fn new(form: Form, files: IndexMap<String, Vec<FileHeader>>) -> Self {
        Self { form, files }
    }

    /// Parses a `multipart/form-data` body.
    ///
    /// Parts carrying a file name become [`FileHeader`]s; all other parts
    /// must be UTF-8 and become text values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The Content-Type header is missing or has no boundary
    /// - The body, a single part, or the field count exceeds `config`
    /// - The multipart data is malformed
    pub async fn parse(headers: &HeaderMap, body: Bytes, config: &FormConfig) -> FormResult<Self> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .ok_or_else(|| FormError::InvalidContentType("missing Content-Type header".into()))?
            .to_str()
            .map_err(|_| {
                FormError::InvalidContentType("invalid UTF-8 in Content-Type header".into())
            })?;

        let boundary = multer::parse_boundary(content_type).map_err(|_| {
            FormError::InvalidContentType(
                "missing or invalid boundary in multipart Content-Type".into(),
            )
        })?;

        if body.len() > config.max_multipart_body_size {
            tracing::warn!(
                max = config.max_multipart_body_size,
                actual = body.len(),
                "multipart body exceeds size limit"
            );
            return Err(FormError::PayloadTooLarge {
                max: config.max_multipart_body_size,
                actual: body.len(),
            });
        }

        let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut files: IndexMap<String, Vec<FileHeader>> = IndexMap::new();
        let mut field_count = 0;

        while let Some(field) = multipart.next_field().await? {
            field_count += 1;
            if field_count > config.max_fields {
                tracing::warn!(max = config.max_fields, "multipart body exceeds field limit");
                return Err(FormError::TooManyFields {
                    max: config.max_fields,
                });
            }

            let Some(name) = field.name().map(str::to_owned) else {
                tracing::trace!(
                    file = field.file_name().is_some(),
                    "skipping multipart part without a name"
                );
                continue;
            };
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().cloned();
            let part_headers = field.headers().clone();
            let data = field.bytes().await?;

            if data.len() > config.max_field_size {
                tracing::warn!(
                    field = %name,
                    max = config.max_field_size,
                    actual = data.len(),
                    "multipart part exceeds size limit"
                );
                return Err(FormError::PayloadTooLarge {
                    max: config.max_field_size,
                    actual: data.len(),
                });
            }

            tracing::trace!(
                field = %name,
                file = file_name.is_some(),
                size = data.len(),
                "parsed multipart part"
            );

            if let Some(file_name) = file_name {
                files.entry(name).or_default().push(FileHeader {
                    file_name,
                    content_type,
                    headers: part_headers,
                    size: data.len(),
                });
            } else {
                let text = String::from_utf8(data.to_vec()).map_err(|e| {
                    FormError::InvalidEncoding(format!(
                        "multipart field {name:?} is not valid UTF-8: {e}"
                    ))
                })?;
                values.entry(name).or_default().push(text);
            }
        }

        Ok(Self::new(Form::new(values), files))
    }

    /// Returns the first file part under `key`.
    #[must_use]
    pub fn file(&self, key: &str) -> Option<&FileHeader> {
        self.files(key).first()
    }

    /// Returns all file parts under `key`, empty if there are none.
    #[must_use]
    pub fn files(&self, key: &str) -> &[FileHeader] {
        self.files.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the field names that carried files, in the order first seen.
    pub fn file_keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Returns the text fields.
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Consumes the multipart form and returns the text fields.
    #[must_use]
    pub fn into_form(self) -> Form {
        self.form
    }
}

impl Deref for MultipartForm {
    type Target = Form;

    fn deref(&self) -> &Self::Target {
        &self.form
    }
}

impl DerefMut for MultipartForm {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.form
    }
}
