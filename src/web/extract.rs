//! Extraction boundary trait for web integration.
//!
//! This module defines the one abstraction framework glue has to implement:
//! reading a cookie by name off a request.

use std::collections::{BTreeMap, HashMap};

/// Reads cookie values off a framework-specific request.
///
/// This trait is the boundary between web framework types and the consent
/// reader. It intentionally does NOT decode or interpret anything; it only
/// hands over raw cookie strings.
///
/// # Examples
///
/// ```
/// use consent_studio::web::{extract_consent, CookieSource};
///
/// // Example framework-specific implementation
/// struct MyFrameworkRequest {
///     id: String,
///     jar: Vec<(String, String)>,
/// }
///
/// impl CookieSource for MyFrameworkRequest {
///     fn cookie(&self, name: &str) -> Option<&str> {
///         self.jar.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
///     }
///
///     fn request_id(&self) -> Option<&str> {
///         Some(&self.id)
///     }
/// }
///
/// let req = MyFrameworkRequest {
///     id: "req-1".to_string(),
///     jar: vec![("consent-studio__seen".to_string(), "true".to_string())],
/// };
/// let reader = extract_consent(&req);
/// assert!(reader.seen_banner());
/// assert_eq!(reader.request_id(), Some("req-1"));
/// ```
pub trait CookieSource {
    /// Returns the raw value of cookie `name`, if the request carries it.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Returns an identifier for the request, used to correlate log events.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

impl CookieSource for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl CookieSource for BTreeMap<String, String> {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}
