//! Example handlers demonstrating web integration with consent gating.
//!
//! This module shows realistic request handler flows that combine the
//! server-side consent reader with client-side resource gating.
//!
//! **These examples are for documentation and testing only.**
//! They demonstrate proper usage patterns without requiring actual HTTP infrastructure.

use crate::banner::BannerConfig;
use crate::categories::{ANALYTICS, MARKETING};
use crate::directive::{banner_script, consent_block};
use crate::error::Error;
use crate::reader::ConsentState;

use super::{extract_consent, CookieSource};

const ANALYTICS_TAG: &str =
    r#"<script async src="https://www.googletagmanager.com/gtag/js?id=G-EXAMPLE"></script>"#;

const VIDEO_EMBED: &str = r#"<iframe src="https://www.youtube-nocookie.com/embed/example" width="560" height="315" allowfullscreen></iframe>"#;

/// A rendered article page.
#[derive(Debug, Clone)]
pub struct ArticlePage {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// `<head>` markup: banner bootstrap plus the gated analytics tag
    pub head: String,
    /// `<body>` markup
    pub body: String,
    /// Consent snapshot the page was rendered with
    pub consent: ConsentState,
}

/// Handles an article page.
///
/// This handler demonstrates:
/// - Extracting consent once per request
/// - Gating third-party resources client side, whatever the current consent
/// - Deciding server side whether to render personalized content at all
///
/// # Errors
///
/// Returns an error if the banner bootstrap cannot be rendered.
///
/// # Examples
///
/// ```
/// use consent_studio::web::{example_handler::handle_article, RequestCookies};
/// use consent_studio::BannerConfig;
///
/// let adapter = RequestCookies::from_cookie_header(
///     "req-article-001",
///     "consent-studio__seen=1; consent-studio__storage=%5B%22marketing%22%5D",
/// );
///
/// let page = handle_article(&adapter, &BannerConfig::default()).expect("renders");
/// assert!(page.head.contains("window.bakery"));
/// assert!(page.body.contains("Recommended for you"));
/// ```
pub fn handle_article<S: CookieSource + ?Sized>(
    source: &S,
    config: &BannerConfig,
) -> Result<ArticlePage, Error> {
    // 1. Extract consent (read only, never fails)
    let consent = extract_consent(source);

    // 2. Head: the banner always loads; analytics waits for consent in the browser
    let mut head = banner_script(config)?;
    head.push('\n');
    head.push_str(&consent_block(ANALYTICS_TAG, Some(ANALYTICS)));

    // 3. Body: the embed is gated client side so it can load once consent arrives
    let mut body = String::from("<article>\n");
    body.push_str(&consent_block(VIDEO_EMBED, Some(MARKETING)));
    body.push('\n');

    // 4. Personalized content is never sent without consent
    if consent.granted(MARKETING) {
        body.push_str("<aside>Recommended for you</aside>\n");
    } else if !consent.seen_banner() {
        consent
            .log()
            .trace(format_args!("banner not seen yet, rendering generic page"));
    }
    body.push_str("</article>");

    Ok(ArticlePage {
        request_id: consent.request_id().map(str::to_string),
        head,
        body,
        consent: consent.state(),
    })
}

/// Handles a JSON endpoint that returns the visitor's consent state.
///
/// Front-end code can call this to mirror the server-side view of consent.
///
/// # Errors
///
/// Returns [`Error::Json`] if the state cannot be serialized.
///
/// # Examples
///
/// ```
/// use consent_studio::web::{example_handler::handle_consent_status, RequestCookies};
///
/// let adapter = RequestCookies::from_cookie_header("req-status", "consent-studio__seen=1");
/// let json = handle_consent_status(&adapter).expect("serializable");
/// assert_eq!(json, r#"{"id":null,"seen":true,"consents":[]}"#);
/// ```
pub fn handle_consent_status<S: CookieSource + ?Sized>(source: &S) -> Result<String, Error> {
    let state = extract_consent(source).state();
    Ok(serde_json::to_string(&state)?)
}
