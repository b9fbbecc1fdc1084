//! Request adapter for mapping HTTP requests to consent cookies.

use std::collections::HashMap;

use crate::cookies::parse_cookie_header;

use super::CookieSource;

/// Adapter for converting framework-specific HTTP requests into a
/// [`CookieSource`].
///
/// `RequestCookies` holds simple, owned data so it does not couple to any
/// framework's request type. Framework glue either feeds it the raw `Cookie`
/// header or adds already-parsed cookies one by one.
///
/// # Examples
///
/// ```
/// use consent_studio::web::{extract_consent, RequestCookies};
///
/// let adapter = RequestCookies::from_cookie_header(
///     "req-12345",
///     "consent-studio__consent-id=abc; consent-studio__storage=%5B%22analytics%22%5D",
/// );
///
/// let reader = extract_consent(&adapter);
/// assert_eq!(reader.id(), Some("abc"));
/// assert!(reader.granted("analytics"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestCookies {
    /// Unique request identifier (required)
    request_id: String,
    /// Cookies by name
    cookies: HashMap<String, String>,
}

impl RequestCookies {
    /// Creates a new adapter with the given request ID and no cookies.
    ///
    /// # Examples
    ///
    /// ```
    /// use consent_studio::web::RequestCookies;
    ///
    /// let adapter = RequestCookies::new("req-001");
    /// assert!(adapter.is_empty());
    /// ```
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            cookies: HashMap::new(),
        }
    }

    /// Creates an adapter from a raw `Cookie` request header.
    ///
    /// When a name repeats, the first occurrence wins.
    pub fn from_cookie_header(request_id: impl Into<String>, header: &str) -> Self {
        let mut adapter = Self::new(request_id);
        for (name, value) in parse_cookie_header(header) {
            adapter
                .cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        adapter
    }

    /// Adds a cookie, replacing any previous value under the same name.
    pub fn add_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Returns the number of cookies held.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns whether no cookies are held.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieSource for RequestCookies {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn request_id(&self) -> Option<&str> {
        Some(&self.request_id)
    }
}
