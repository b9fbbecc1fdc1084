//! Raw consent cookie values and `Cookie` header parsing.
//!
//! The hosted banner script writes three cookies, all sharing the
//! [`COOKIE_PREFIX`]. This module only carries their raw values; every
//! interpretation lives in [`ConsentReader`](crate::ConsentReader).

/// Prefix shared by every cookie the banner writes.
pub const COOKIE_PREFIX: &str = "consent-studio__";

/// Cookie holding the "banner seen" flag.
pub const SEEN_COOKIE: &str = "consent-studio__seen";

/// Cookie holding the opaque consent identifier.
pub const CONSENT_ID_COOKIE: &str = "consent-studio__consent-id";

/// Cookie holding the URL-encoded JSON array of granted categories.
pub const STORAGE_COOKIE: &str = "consent-studio__storage";

/// The three raw cookie inputs of one request.
///
/// Absent and empty values both mean "no information". Nothing here is
/// validated; malformed values degrade to "nothing granted" when read.
///
/// # Examples
///
/// ```
/// use consent_studio::RawCookieValues;
///
/// let raw = RawCookieValues::new()
///     .with_seen("true")
///     .with_storage("%5B%22functional%22%5D");
///
/// assert_eq!(raw.seen(), Some("true"));
/// assert_eq!(raw.consent_id(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCookieValues {
    seen: Option<String>,
    consent_id: Option<String>,
    storage: Option<String>,
}

impl RawCookieValues {
    /// Creates an empty set of cookie values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw `seen` cookie value.
    pub fn with_seen(mut self, value: impl Into<String>) -> Self {
        self.seen = Some(value.into());
        self
    }

    /// Sets the raw `consent-id` cookie value.
    pub fn with_consent_id(mut self, value: impl Into<String>) -> Self {
        self.consent_id = Some(value.into());
        self
    }

    /// Sets the raw `storage` cookie value.
    pub fn with_storage(mut self, value: impl Into<String>) -> Self {
        self.storage = Some(value.into());
        self
    }

    /// Collects the consent cookies out of any `(name, value)` sequence.
    ///
    /// Unrelated cookies are ignored. When a name repeats, the first
    /// occurrence wins, which is how browsers order the more specific path.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut raw = Self::default();
        for (name, value) in pairs {
            let slot = match name {
                SEEN_COOKIE => &mut raw.seen,
                CONSENT_ID_COOKIE => &mut raw.consent_id,
                STORAGE_COOKIE => &mut raw.storage,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        raw
    }

    /// Collects the consent cookies out of a raw `Cookie` request header.
    pub fn from_cookie_header(header: &str) -> Self {
        Self::from_pairs(parse_cookie_header(header))
    }

    /// Returns the raw `seen` value, treating empty as absent.
    pub fn seen(&self) -> Option<&str> {
        non_empty(&self.seen)
    }

    /// Returns the raw `consent-id` value, treating empty as absent.
    pub fn consent_id(&self) -> Option<&str> {
        non_empty(&self.consent_id)
    }

    /// Returns the raw `storage` value, treating empty as absent.
    pub fn storage(&self) -> Option<&str> {
        non_empty(&self.storage)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Splits a `Cookie` header into `(name, value)` pairs.
///
/// Pairs without `=` or with an empty name are skipped. A value wrapped in
/// double quotes is returned without them.
///
/// # Examples
///
/// ```
/// use consent_studio::parse_cookie_header;
///
/// let pairs: Vec<_> = parse_cookie_header("a=1; b=\"two\"; junk").collect();
/// assert_eq!(pairs, vec![("a", "1"), ("b", "two")]);
/// ```
pub fn parse_cookie_header(header: &str) -> impl Iterator<Item = (&str, &str)> {
    header.split(';').filter_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Some((name, value))
    })
}
