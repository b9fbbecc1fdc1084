//! Server-side integration for the Consent Studio cookie banner.
//!
//! This crate provides the two halves a site needs around the hosted banner:
//! - **Reading consent**: the banner stores the visitor's choices in cookies;
//!   [`ConsentReader`] answers "is this category granted?" from them
//! - **Gating resources**: [`html::transform`] rewrites scripts, iframes and
//!   media so the browser loads nothing until the banner sees consent
//!
//! Plus the glue around them: the banner bootstrap script ([`render_script`]),
//! template hooks ([`directive`]) and a framework-neutral request boundary
//! ([`web`]).
//!
//! # Core Types
//!
//! - [`RawCookieValues`]: The three consent cookies as sent by the browser
//! - [`ConsentReader`]: Interprets those cookies; never fails
//! - [`ConsentState`]: Serializable snapshot of one visitor's consent
//! - [`BannerConfig`]: Google Consent Mode defaults and debug flag
//!
//! # Examples
//!
//! ```
//! use consent_studio::{parse_cookie_header, ConsentReader, RawCookieValues};
//!
//! let header = "consent-studio__seen=1; consent-studio__storage=%5B%22analytics%22%5D";
//! let reader = ConsentReader::new(RawCookieValues::from_pairs(parse_cookie_header(header)));
//!
//! assert!(reader.seen_banner());
//! assert!(reader.granted("analytics"));
//! assert!(!reader.any(&["marketing"]));
//!
//! // Gate a tracking pixel behind the analytics category
//! let html = consent_studio::html::transform(r#"<img src="https://px.test/p.gif">"#, "analytics");
//! assert_eq!(html, r#"<img data-src="https://px.test/p.gif" cs-require="analytics">"#);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod banner;
pub mod categories;
pub mod cookies;
pub mod directive;
mod error;
pub mod html;
mod logging;
mod reader;
pub mod web;

pub use banner::{bootstrap_json, render_script, BannerConfig, ConsentDefaults, GoogleConsentMode};
pub use cookies::{
    parse_cookie_header, RawCookieValues, CONSENT_ID_COOKIE, COOKIE_PREFIX, SEEN_COOKIE,
    STORAGE_COOKIE,
};
pub use error::Error;
pub use html::transform;
pub use logging::RequestLog;
pub use reader::{ConsentQuery, ConsentReader, ConsentState};
