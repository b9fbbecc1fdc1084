use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cookies::RawCookieValues;
use crate::logging::RequestLog;

/// Snapshot of one request's consent cookies.
///
/// Serializes as `{"id": ..., "seen": ..., "consents": [...]}` so it can be
/// handed to front-end code unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentState {
    /// Opaque consent identifier, if the banner assigned one
    pub id: Option<String>,
    /// Whether the visitor has seen the banner
    pub seen: bool,
    /// Granted categories, in cookie order
    pub consents: Vec<String>,
}

/// A consent question: one category, or "any of" a list.
///
/// Mirrors the shorthand template authors use: a single category asks
/// whether it is granted, a list asks whether at least one is.
///
/// # Examples
///
/// ```
/// use consent_studio::{ConsentQuery, ConsentReader, RawCookieValues};
///
/// let reader = ConsentReader::new(RawCookieValues::new().with_storage("[\"analytics\"]"));
///
/// assert!(reader.check("analytics"));
/// assert!(reader.check(["marketing", "analytics"]));
/// assert!(!reader.check(ConsentQuery::from("marketing")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentQuery {
    /// Is this category granted?
    One(String),
    /// Is at least one of these categories granted?
    Any(Vec<String>),
}

impl From<&str> for ConsentQuery {
    fn from(category: &str) -> Self {
        ConsentQuery::One(category.to_string())
    }
}

impl From<String> for ConsentQuery {
    fn from(category: String) -> Self {
        ConsentQuery::One(category)
    }
}

impl From<&[&str]> for ConsentQuery {
    fn from(categories: &[&str]) -> Self {
        ConsentQuery::Any(categories.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ConsentQuery {
    fn from(categories: [&str; N]) -> Self {
        ConsentQuery::from(&categories[..])
    }
}

impl From<Vec<String>> for ConsentQuery {
    fn from(categories: Vec<String>) -> Self {
        ConsentQuery::Any(categories)
    }
}

/// Reads consent state out of one request's cookies.
///
/// A reader is built once per incoming request and passed explicitly to
/// whatever needs to answer consent questions. Every query is total: absent
/// or malformed cookies answer "not seen", "no id" and "nothing granted".
///
/// # Examples
///
/// ```
/// use consent_studio::{ConsentReader, RawCookieValues};
///
/// let raw = RawCookieValues::new()
///     .with_seen("1")
///     .with_consent_id("abc-123")
///     .with_storage("%5B%22functional%22%2C%22analytics%22%5D");
///
/// let reader = ConsentReader::new(raw);
/// assert!(reader.seen_banner());
/// assert_eq!(reader.id(), Some("abc-123"));
/// assert!(reader.granted("analytics"));
/// assert!(!reader.granted("marketing"));
/// assert!(reader.all_granted(&["functional", "analytics"]));
/// ```
#[derive(Debug, Clone)]
pub struct ConsentReader {
    request_id: Option<String>,
    raw: RawCookieValues,
    granted: Vec<String>,
}

impl ConsentReader {
    /// Creates a reader for cookies that are not tied to a request ID.
    pub fn new(raw: RawCookieValues) -> Self {
        Self::build(None, raw)
    }

    /// Creates a reader for the cookies of a specific request.
    ///
    /// The request ID is attached to every log event the reader emits.
    pub fn for_request(request_id: impl Into<String>, raw: RawCookieValues) -> Self {
        Self::build(Some(request_id.into()), raw)
    }

    /// Creates a reader with no cookies at all.
    ///
    /// Use this outside a request (CLI commands, background jobs); every
    /// query answers with the safe default.
    pub fn detached() -> Self {
        Self::new(RawCookieValues::default())
    }

    fn build(request_id: Option<String>, raw: RawCookieValues) -> Self {
        let granted = match raw.storage() {
            Some(value) => parse_storage(value, RequestLog::new(request_id.as_deref())),
            None => Vec::new(),
        };
        Self {
            request_id,
            raw,
            granted,
        }
    }

    /// Returns the request ID this reader was built for, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns a logger scoped to this reader's request.
    pub fn log(&self) -> RequestLog<'_> {
        RequestLog::new(self.request_id.as_deref())
    }

    /// Returns whether the visitor has seen the consent banner.
    ///
    /// Absent or empty cookies are `false`; otherwise the value is read as a
    /// loose boolean (`"1"`, `"true"`, `"on"`, `"yes"`, any case).
    pub fn seen_banner(&self) -> bool {
        self.raw.seen().is_some_and(parse_loose_bool)
    }

    /// Returns the consent identifier verbatim, or `None` if absent or empty.
    pub fn id(&self) -> Option<&str> {
        self.raw.consent_id()
    }

    /// Returns every granted category, in cookie order.
    pub fn list_granted(&self) -> &[String] {
        &self.granted
    }

    /// Returns whether `category` is granted (exact, case-sensitive match).
    pub fn granted(&self, category: &str) -> bool {
        self.granted.iter().any(|g| g == category)
    }

    /// Returns whether at least one of `categories` is granted.
    ///
    /// An empty list is never satisfied.
    pub fn any<S: AsRef<str>>(&self, categories: &[S]) -> bool {
        categories.iter().any(|c| self.granted(c.as_ref()))
    }

    /// Returns whether every one of `categories` is granted.
    ///
    /// An empty list is vacuously satisfied.
    pub fn all_granted<S: AsRef<str>>(&self, categories: &[S]) -> bool {
        categories.iter().all(|c| self.granted(c.as_ref()))
    }

    /// Evaluates a [`ConsentQuery`].
    pub fn check(&self, query: impl Into<ConsentQuery>) -> bool {
        match query.into() {
            ConsentQuery::One(category) => self.granted(&category),
            ConsentQuery::Any(categories) => self.any(&categories),
        }
    }

    /// Aggregates id, seen flag and granted categories into one record.
    pub fn state(&self) -> ConsentState {
        ConsentState {
            id: self.id().map(str::to_string),
            seen: self.seen_banner(),
            consents: self.granted.clone(),
        }
    }
}

impl Default for ConsentReader {
    fn default() -> Self {
        Self::detached()
    }
}

/// Reads a cookie flag the way form values are read: `1`, `true`, `on` and
/// `yes` are true regardless of case, everything else is false.
pub(crate) fn parse_loose_bool(value: &str) -> bool {
    let value = value.trim();
    ["1", "true", "on", "yes"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

/// Decodes the storage cookie into its list of category strings.
///
/// The value is form-decoded (`+` is a space, `%XX` an escaped byte) and
/// parsed as JSON. Anything but an array yields no categories; non-string
/// array members are skipped.
fn parse_storage(value: &str, log: RequestLog<'_>) -> Vec<String> {
    let Some(decoded) = form_decode(value) else {
        log.debug(format_args!(
            "storage cookie is not valid UTF-8 after decoding ({} bytes)",
            value.len()
        ));
        return Vec::new();
    };

    let items = match serde_json::from_str::<Value>(&decoded) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log.debug(format_args!("storage cookie is JSON but not an array"));
            return Vec::new();
        }
        Err(err) => {
            log.debug(format_args!("storage cookie is not JSON: {err}"));
            return Vec::new();
        }
    };

    let total = items.len();
    let granted: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(category) => Some(category),
            _ => None,
        })
        .collect();

    if granted.len() != total {
        log.debug(format_args!(
            "skipped {} non-string storage entries",
            total - granted.len()
        ));
    }
    log.trace(format_args!("storage cookie grants {} categories", granted.len()));
    granted
}

fn form_decode(value: &str) -> Option<String> {
    let spaced: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}
