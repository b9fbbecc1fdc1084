//! Extractor functions for building a [`ConsentReader`] from HTTP requests.
//!
//! This module is the boundary layer between HTTP frameworks and the consent
//! reader. It only reads the three consent cookies; deciding what to render
//! is left to the handler.
//!
//! # Integration Flow
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code implements CookieSource (or builds RequestCookies)
//!   ↓
//! Call extract_consent()
//!   ↓
//! Receive ConsentReader bound to the request id
//!   ↓
//! Handler queries granted()/any()/all_granted()
//! ```

use crate::cookies::{RawCookieValues, CONSENT_ID_COOKIE, SEEN_COOKIE, STORAGE_COOKIE};
use crate::reader::{ConsentReader, ConsentState};

use super::CookieSource;

/// Collects the raw consent cookies from a request.
///
/// Other cookies are ignored.
pub fn extract_raw<S: CookieSource + ?Sized>(source: &S) -> RawCookieValues {
    let mut raw = RawCookieValues::new();
    if let Some(value) = source.cookie(SEEN_COOKIE) {
        raw = raw.with_seen(value);
    }
    if let Some(value) = source.cookie(CONSENT_ID_COOKIE) {
        raw = raw.with_consent_id(value);
    }
    if let Some(value) = source.cookie(STORAGE_COOKIE) {
        raw = raw.with_storage(value);
    }
    raw
}

/// Builds a consent reader for a request.
///
/// The reader is built once per request; anything it logs carries the
/// source's request id when there is one.
///
/// # Examples
///
/// ```
/// use consent_studio::web::{extract_consent, RequestCookies};
///
/// let mut adapter = RequestCookies::new("req-001");
/// adapter.add_cookie("consent-studio__seen", "1");
/// adapter.add_cookie("consent-studio__storage", "%5B%22functional%22%2C%22analytics%22%5D");
///
/// let reader = extract_consent(&adapter);
/// assert!(reader.seen_banner());
/// assert!(reader.all_granted(&["functional", "analytics"]));
/// assert!(!reader.granted("marketing"));
/// ```
pub fn extract_consent<S: CookieSource + ?Sized>(source: &S) -> ConsentReader {
    let raw = extract_raw(source);
    let reader = match source.request_id() {
        Some(id) => ConsentReader::for_request(id, raw),
        None => ConsentReader::new(raw),
    };

    reader.log().debug(format_args!(
        "consent extracted: seen={} granted={}",
        reader.seen_banner(),
        reader.list_granted().len()
    ));
    reader
}

/// Extracts the consent snapshot of a request, for handing to templates or
/// serializing into a response.
///
/// # Examples
///
/// ```
/// use consent_studio::web::{extract_state, RequestCookies};
///
/// let adapter = RequestCookies::from_cookie_header("req-002", "consent-studio__consent-id=abc");
/// let state = extract_state(&adapter);
///
/// assert_eq!(state.id.as_deref(), Some("abc"));
/// assert!(!state.seen);
/// assert!(state.consents.is_empty());
/// ```
pub fn extract_state<S: CookieSource + ?Sized>(source: &S) -> ConsentState {
    extract_consent(source).state()
}
