//! Per-element gating rules.
//!
//! Each gateable element is classified into an [`ElementKind`]; the kind
//! decides both dispatch priority and how the start tag is rewritten.

use std::fmt;

use super::tokenizer::StartTag;

/// Attribute holding the deferred resource URL.
pub const DATA_SRC: &str = "data-src";

/// Attribute naming the consent category that gates the element.
pub const CS_REQUIRE: &str = "cs-require";

/// Script type that keeps the browser from executing an inline script.
pub const INERT_SCRIPT_TYPE: &str = "text/plain";

/// Media and resource elements gated by moving `src` to `data-src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaElement {
    /// `<img>`
    Img,
    /// `<video>`
    Video,
    /// `<audio>`
    Audio,
    /// `<embed>`
    Embed,
    /// `<source>`
    Source,
    /// `<track>`
    Track,
}

impl MediaElement {
    /// Every media element, in matching order.
    pub const ALL: [MediaElement; 6] = [
        MediaElement::Img,
        MediaElement::Video,
        MediaElement::Audio,
        MediaElement::Embed,
        MediaElement::Source,
        MediaElement::Track,
    ];

    /// Returns the lowercase tag name.
    pub fn tag_name(self) -> &'static str {
        match self {
            MediaElement::Img => "img",
            MediaElement::Video => "video",
            MediaElement::Audio => "audio",
            MediaElement::Embed => "embed",
            MediaElement::Source => "source",
            MediaElement::Track => "track",
        }
    }

    /// Looks up a media element by tag name (ASCII case-insensitive).
    pub fn from_tag_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.tag_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MediaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// A gateable element, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<script>` with neither `src` nor `data-src`
    InlineScript,
    /// `<script>` loading an external resource
    ExternalScript,
    /// `<iframe>` with a `src`
    Iframe,
    /// A [`MediaElement`] with a `src`
    Media(MediaElement),
}

impl ElementKind {
    /// Dispatch priority; lower wins.
    pub fn priority(self) -> u8 {
        match self {
            ElementKind::InlineScript => 0,
            ElementKind::ExternalScript => 1,
            ElementKind::Iframe => 2,
            ElementKind::Media(_) => 3,
        }
    }

    /// Returns whether an element of this kind is rewritten when `winner` is
    /// the dispatched rule.
    ///
    /// Scripts travel together: when an inline script wins, external scripts
    /// in the same fragment are gated too, so a loader never runs ahead of
    /// its inline configuration.
    pub fn gated_under(self, winner: ElementKind) -> bool {
        self.priority() == winner.priority()
            || (winner == ElementKind::InlineScript && self == ElementKind::ExternalScript)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::InlineScript => write!(f, "inline script"),
            ElementKind::ExternalScript => write!(f, "external script"),
            ElementKind::Iframe => write!(f, "iframe"),
            ElementKind::Media(media) => write!(f, "{media}"),
        }
    }
}

/// Classifies a start tag, or returns `None` if it is not gateable.
///
/// A script is external as soon as it carries `src` or `data-src`, but it is
/// only gateable when one of them holds a URL. Iframes and media need a
/// non-empty `src`; already gated ones (URL parked in `data-src`) are left
/// alone.
pub(crate) fn classify(tag: &StartTag<'_>) -> Option<ElementKind> {
    if tag.is("script") {
        if !tag.has_attr("src") && !tag.has_attr(DATA_SRC) {
            return Some(ElementKind::InlineScript);
        }
        return script_url(tag).map(|_| ElementKind::ExternalScript);
    }
    tag.non_empty_value("src")?;
    if tag.is("iframe") {
        return Some(ElementKind::Iframe);
    }
    MediaElement::from_tag_name(tag.name).map(ElementKind::Media)
}

/// The URL an external script loads: `src`, or the parked `data-src` when
/// `src` has already been emptied.
fn script_url<'a>(tag: &StartTag<'a>) -> Option<&'a str> {
    tag.non_empty_value("src")
        .or_else(|| tag.non_empty_value(DATA_SRC))
}

/// Rewrites a classified start tag so its resource waits for `category`.
pub(crate) fn rewrite(tag: &StartTag<'_>, kind: ElementKind, category: &str) -> String {
    match kind {
        ElementKind::InlineScript => rewrite_inline_script(tag, category),
        ElementKind::ExternalScript => {
            let url = script_url(tag).unwrap_or_default();
            let markers = format!(
                r#"src="" {DATA_SRC}="{}" {CS_REQUIRE}="{}""#,
                escape_attr(url),
                escape_attr(category)
            );
            replace_source(tag, &markers)
        }
        ElementKind::Iframe | ElementKind::Media(_) => {
            let url = tag.non_empty_value("src").unwrap_or_default();
            let markers = format!(
                r#"{DATA_SRC}="{}" {CS_REQUIRE}="{}""#,
                escape_attr(url),
                escape_attr(category)
            );
            replace_source(tag, &markers)
        }
    }
}

/// Marks an inline script inert: `type` becomes `text/plain` (in place if it
/// exists, right after the tag name otherwise) and `cs-require` follows it.
fn rewrite_inline_script(tag: &StartTag<'_>, category: &str) -> String {
    let markers = format!(
        r#"type="{INERT_SCRIPT_TYPE}" {CS_REQUIRE}="{}""#,
        escape_attr(category)
    );
    let anchor = tag.attrs.iter().position(|a| a.is("type"));

    let mut writer = TagWriter::open(tag);
    if anchor.is_none() {
        writer.markers(" ", &markers);
    }
    for (idx, attr) in tag.attrs.iter().enumerate() {
        if Some(idx) == anchor {
            writer.markers(attr.leading, &markers);
        } else if !(attr.is("type") || attr.is(CS_REQUIRE)) {
            writer.attr(attr.leading, attr.raw);
        }
    }
    writer.close(tag)
}

/// Puts `markers` where the first `src`/`data-src` sat and drops every other
/// `src`, `data-src` and `cs-require`.
fn replace_source(tag: &StartTag<'_>, markers: &str) -> String {
    let is_source = |name: &str| name.eq_ignore_ascii_case("src") || name.eq_ignore_ascii_case(DATA_SRC);
    let anchor = tag.attrs.iter().position(|a| is_source(a.name));

    let mut writer = TagWriter::open(tag);
    for (idx, attr) in tag.attrs.iter().enumerate() {
        if Some(idx) == anchor {
            writer.markers(attr.leading, markers);
        } else if !(is_source(attr.name) || attr.is(CS_REQUIRE)) {
            writer.attr(attr.leading, attr.raw);
        }
    }
    writer.close(tag)
}

/// Escapes a value for a double-quoted attribute.
///
/// Values come from already-valid markup, so only the delimiter needs care.
fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Reassembles a start tag from kept attributes and injected markers.
struct TagWriter {
    out: String,
    // Whether the next attribute may abut the previous output.
    may_abut: bool,
}

impl TagWriter {
    fn open(tag: &StartTag<'_>) -> Self {
        let mut out = String::with_capacity(tag.span.len() + 64);
        out.push('<');
        out.push_str(tag.name);
        Self {
            out,
            may_abut: false,
        }
    }

    fn attr(&mut self, leading: &str, raw: &str) {
        if leading.is_empty() && !self.may_abut {
            self.out.push(' ');
        }
        self.out.push_str(leading);
        self.out.push_str(raw);
        self.may_abut = true;
    }

    fn markers(&mut self, leading: &str, markers: &str) {
        self.out.push_str(if leading.is_empty() { " " } else { leading });
        self.out.push_str(markers);
        self.may_abut = false;
    }

    fn close(mut self, tag: &StartTag<'_>) -> String {
        self.out.push_str(tag.trailing);
        self.out.push_str(if tag.self_closing { "/>" } else { ">" });
        self.out
    }
}
