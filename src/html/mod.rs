//! Consent gating for embedded HTML fragments.
//!
//! [`transform`] rewrites the start tags of a fragment so the browser loads
//! nothing until the hosted banner script sees the required consent:
//!
//! 1. **Inline `<script>`**: `type` becomes `text/plain`, `cs-require` is added,
//!    the body is left untouched.
//! 2. **External `<script src>`**: `src` is emptied, its URL moves to
//!    `data-src`, `cs-require` is added.
//! 3. **`<iframe src>`**: `src` is replaced by `data-src` plus `cs-require`.
//! 4. **Media** (`img`, `video`, `audio`, `embed`, `source`, `track`) with
//!    `src`: same as iframes.
//!
//! The first rule that matches any element of the fragment wins, and is
//! applied to every element it matches. Scripts are the exception: when an
//! inline script wins, external scripts beside it are gated as well. Fragments with no gateable element
//! come back unchanged. Untouched attributes keep their position, quoting and
//! spacing; `/>` stays `/>`.
//!
//! # Examples
//!
//! ```
//! use consent_studio::html::transform;
//!
//! let out = transform(r#"<script src="https://a.co/x.js"></script>"#, "analytics");
//! assert_eq!(
//!     out,
//!     r#"<script src="" data-src="https://a.co/x.js" cs-require="analytics"></script>"#
//! );
//! ```

mod rules;
mod tokenizer;

pub use rules::{ElementKind, MediaElement, CS_REQUIRE, DATA_SRC, INERT_SCRIPT_TYPE};

use rules::{classify, rewrite};
use tokenizer::start_tags;

/// Gates every resource in `fragment` behind `category`.
///
/// Never fails: malformed or unrecognised markup passes through unchanged.
/// The category is inserted verbatim apart from quote escaping; it is
/// expected to be a developer-chosen token, not user input.
pub fn transform(fragment: &str, category: &str) -> String {
    let tags = start_tags(fragment);
    let classified: Vec<_> = tags
        .iter()
        .filter_map(|tag| classify(tag).map(|kind| (tag, kind)))
        .collect();

    let Some(winner) = classified
        .iter()
        .map(|(_, kind)| *kind)
        .min_by_key(|kind| kind.priority())
    else {
        tracing::trace!(
            category,
            len = fragment.len(),
            "no gateable element, fragment unchanged"
        );
        return fragment.to_string();
    };

    let mut out = String::with_capacity(fragment.len() + 64);
    let mut copied = 0;
    let mut rewritten = 0usize;

    for (tag, kind) in classified
        .into_iter()
        .filter(|(_, kind)| kind.gated_under(winner))
    {
        out.push_str(&fragment[copied..tag.span.start]);
        out.push_str(&rewrite(tag, kind, category));
        copied = tag.span.end;
        rewritten += 1;

        tracing::trace!(kind = %kind, element = tag.name, "gated element");
    }
    out.push_str(&fragment[copied..]);

    tracing::debug!(category, rewritten, "gated html fragment");
    out
}

/// Returns the kind of element [`transform`] would gate in `fragment`, if any.
///
/// Useful in template test suites to assert that a block is recognised
/// before it ships.
///
/// ```
/// use consent_studio::html::{gated_kind, ElementKind, MediaElement};
///
/// assert_eq!(gated_kind("<script>track()</script>"), Some(ElementKind::InlineScript));
/// assert_eq!(
///     gated_kind(r#"<img src="p.gif">"#),
///     Some(ElementKind::Media(MediaElement::Img))
/// );
/// assert_eq!(gated_kind("<p>hello</p>"), None);
/// ```
pub fn gated_kind(fragment: &str) -> Option<ElementKind> {
    start_tags(fragment)
        .iter()
        .filter_map(classify)
        .min_by_key(|kind| kind.priority())
}
