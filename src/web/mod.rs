//! Web framework integration surface.
//!
//! This module provides the boundary between HTTP frameworks and the consent
//! reader. It handles:
//! - Reading the consent cookies off a request ([`CookieSource`])
//! - Owning cookies for frameworks that only expose a header ([`RequestCookies`])
//! - Request-ID propagation into the reader's log events
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific code.
//!    It defines interfaces that framework-specific code can implement.
//!
//! 2. **Read Only**: Cookies are written by the hosted banner in the browser.
//!    Nothing here sets or clears them.
//!
//! 3. **Explicit Context**: No global state. The reader is built per request
//!    and handed to whoever renders the response.
//!
//! # Integration Model
//!
//! Framework-specific extractors should:
//! 1. Implement [`CookieSource`] for the framework request, or build
//!    [`RequestCookies`] from its `Cookie` header
//! 2. Call [`extract_consent`] to get a [`ConsentReader`](crate::ConsentReader)
//! 3. Query the reader to decide what to render server side
//! 4. Gate client-side resources with [`consent_block`](crate::directive::consent_block)
//!
//! # Example Flow
//!
//! ```
//! use consent_studio::web::{extract_consent, RequestCookies};
//! use consent_studio::directive::consent_block;
//!
//! // 1. Extract from HTTP request
//! let adapter = RequestCookies::from_cookie_header(
//!     "req-42",
//!     "consent-studio__seen=1; consent-studio__storage=%5B%22analytics%22%5D",
//! );
//! let consent = extract_consent(&adapter);
//!
//! // 2. Decide server side
//! let show_recommendations = consent.granted("marketing");
//! assert!(!show_recommendations);
//!
//! // 3. Gate client-side resources
//! let pixel = consent_block(r#"<img src="https://px.test/p.gif">"#, Some("analytics"));
//! assert!(pixel.contains("data-src"));
//! ```

mod adapter;
pub mod example_handler;
mod extract;
mod middleware;

pub use adapter::RequestCookies;
pub use extract::CookieSource;
pub use middleware::{extract_consent, extract_raw, extract_state};
