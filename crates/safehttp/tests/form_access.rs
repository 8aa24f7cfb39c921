//! End-to-end tests for typed form access.
//!
//! These tests drive forms the way a handler would: build the form from the
//! raw request, read a batch of typed values, then inspect the error slot
//! and map it to a status code.

use indexmap::IndexMap;
use safehttp::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("safehttp_form=debug")
        .with_test_writer()
        .try_init();
}

fn values(pairs: &[(&str, &str)]) -> IndexMap<String, Vec<String>> {
    let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in pairs {
        values
            .entry((*key).to_string())
            .or_default()
            .push((*value).to_string());
    }
    values
}

#[test]
fn absent_keys_return_defaults_without_error() {
    let mut form = Form::new(values(&[("other", "1")]));

    assert_eq!(form.int64("n", -4), -4);
    assert_eq!(form.uint64("n", 4), 4);
    assert!((form.float64("n", 0.25) - 0.25).abs() < f64::EPSILON);
    assert_eq!(form.string("n", "dflt"), "dflt");
    assert!(form.bool("n", true));
    assert!(form.err().is_none());
}

#[test]
fn integer_conversion() {
    init_tracing();
    let mut form = Form::new(values(&[("n", "42"), ("bad", "abc")]));

    assert_eq!(form.int64("n", 0), 42);
    assert!(form.err().is_none());

    assert_eq!(form.int64("bad", 7), 7);
    let err = form.err().expect("conversion error recorded");
    assert_eq!(err.key(), Some("bad"));
    assert_eq!(err.status_code(), StatusCode::BadRequest);
}

#[test]
fn boolean_tokens() {
    let mut form = Form::new(values(&[("t", "true"), ("f", "false"), ("m", "maybe")]));

    assert!(form.bool("t", false));
    assert!(!form.bool("f", false));
    assert!(form.err().is_none());

    assert!(!form.bool("m", false));
    assert!(matches!(form.err(), Some(FormError::InvalidBool { .. })));
}

#[test]
fn slice_failure_leaves_no_partial_result() {
    init_tracing();
    let mut form = Form::new(values(&[("xs", "1"), ("xs", "2"), ("xs", "x")]));
    let mut xs: Vec<i64> = vec![100];

    form.slice(&mut xs, "xs");

    assert!(xs.is_empty());
    assert!(form.err().is_some());
}

#[test]
fn slice_absent_key_clears_destination() {
    let mut form = Form::new(values(&[("xs", "1")]));
    let mut xs: Vec<String> = vec!["stale".to_string()];

    form.slice(&mut xs, "ys");

    assert!(xs.is_empty());
    assert!(form.err().is_none());
}

#[test]
fn slice_absent_key_resets_recorded_error() {
    let mut form = Form::new(values(&[("n", "nan?")]));
    form.float64("n", 0.0);
    assert!(form.err().is_some());

    let mut xs: Vec<f64> = Vec::new();
    form.slice(&mut xs, "missing");
    assert!(form.err().is_none());
}

#[test]
fn slice_any_rejects_unsupported_destination() {
    let mut form = Form::new(values(&[("xs", "1")]));
    let mut xs: Vec<i16> = Vec::new();

    form.slice_any(&mut xs, "missing");

    let err = form.err().expect("type error recorded");
    assert!(matches!(err, FormError::UnsupportedType { .. }));
    assert_eq!(err.status_code(), StatusCode::InternalServerError);
}

#[test]
fn handler_batch_reports_last_failure() {
    init_tracing();
    let mut form = Form::from_query("page=two&size=10&sort=asc&desc=nope").unwrap();

    let page = form.uint64("page", 1);
    let size = form.uint64("size", 20);
    let sort = form.string("sort", "id").to_string();
    let desc = form.bool("desc", false);

    assert_eq!((page, size, sort.as_str(), desc), (1, 10, "asc", false));
    let err = form.take_err().expect("errors recorded");
    assert_eq!(err.key(), Some("desc"));
    assert!(form.err().is_none());
}

#[test]
fn urlencoded_body_respects_config() {
    let config = FormConfig::from_toml_str("max_body_size = 16").unwrap();

    let mut form = Form::from_urlencoded(b"a=1&b=2", &config).unwrap();
    assert_eq!(form.int64("b", 0), 2);

    let err = Form::from_urlencoded(b"comment=this+is+far+too+long", &config).unwrap_err();
    assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
    assert_eq!(err.status_code(), StatusCode::BadRequest);
}

#[test]
fn status_codes_match_iana_values() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);

    let forbidden: http::StatusCode = StatusCode::Forbidden.into();
    assert_eq!(forbidden, http::StatusCode::FORBIDDEN);
}
