//! Template hooks.
//!
//! Templating engines register these as plain functions: one renders the
//! banner bootstrap, the other gates a captured block of markup behind a
//! consent category. Neither touches request state.
//!
//! # Examples
//!
//! ```
//! use consent_studio::directive::consent_block;
//!
//! let html = consent_block("\n<img src=\"https://px.test/p.gif\">\n", Some("analytics"));
//! assert_eq!(
//!     html,
//!     r#"<img data-src="https://px.test/p.gif" cs-require="analytics">"#
//! );
//! ```

use std::fmt;

use crate::banner::{render_script, BannerConfig};
use crate::categories;
use crate::error::Error;
use crate::html::transform;

/// Category used when a block names none.
pub const DEFAULT_CATEGORY: &str = categories::FUNCTIONAL;

/// Gates a captured template block behind `category`.
///
/// Surrounding whitespace of the block is trimmed; `None` falls back to
/// [`DEFAULT_CATEGORY`].
pub fn consent_block(body: &str, category: Option<&str>) -> String {
    transform(body.trim(), category.unwrap_or(DEFAULT_CATEGORY))
}

/// Renders the banner bootstrap `<script>` block.
///
/// # Errors
///
/// Returns [`Error::Json`] if the configuration cannot be serialized.
pub fn banner_script(config: &BannerConfig) -> Result<String, Error> {
    render_script(config)
}

/// A consent block being captured.
///
/// Engines that stream output through [`fmt::Write`] open a block at the
/// start tag of the directive, write the body into it, and [`finish`] it at
/// the end tag.
///
/// [`finish`]: ConsentBlock::finish
///
/// # Examples
///
/// ```
/// use std::fmt::Write;
/// use consent_studio::directive::ConsentBlock;
///
/// let mut block = ConsentBlock::open(Some("marketing"));
/// write!(block, "<script>fbq('track', '{}');</script>", "PageView").unwrap();
///
/// let html = block.finish();
/// assert!(html.contains(r#"cs-require="marketing""#));
/// assert!(html.contains("fbq('track', 'PageView');"));
/// ```
#[derive(Debug, Clone)]
pub struct ConsentBlock {
    category: String,
    body: String,
}

impl ConsentBlock {
    /// Opens a block for `category` (or [`DEFAULT_CATEGORY`]).
    pub fn open(category: Option<&str>) -> Self {
        Self {
            category: category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            body: String::new(),
        }
    }

    /// Returns the category this block is gated behind.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Appends captured markup.
    pub fn push_str(&mut self, markup: &str) {
        self.body.push_str(markup);
    }

    /// Closes the block and returns the gated markup.
    pub fn finish(self) -> String {
        consent_block(&self.body, Some(&self.category))
    }
}

impl fmt::Write for ConsentBlock {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}
