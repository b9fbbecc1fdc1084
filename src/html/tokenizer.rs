//! Start-tag tokenizer for template-authored HTML fragments.
//!
//! Only start tags are tokenized; everything else (text, end tags, comments,
//! the bodies of `script` and `style`) is opaque. Every token borrows from the
//! fragment so untouched attributes can be written back byte-for-byte.

use std::ops::Range;

/// Elements whose content is raw text, never markup.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// An attribute value and the quote character that delimited it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttrValue<'a> {
    /// Text between the quotes (or the whole unquoted value)
    pub text: &'a str,
    /// `Some('"')`, `Some('\'')`, or `None` when unquoted
    pub quote: Option<char>,
}

/// One attribute of a start tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Attribute<'a> {
    /// Whitespace preceding the attribute; empty when it abuts the previous one
    pub leading: &'a str,
    /// Attribute name as written
    pub name: &'a str,
    /// Value, if the attribute has `=`
    pub value: Option<AttrValue<'a>>,
    /// The attribute verbatim, from name through closing quote
    pub raw: &'a str,
}

impl<'a> Attribute<'a> {
    /// Returns whether this attribute is called `name` (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the value text, or `None` for a bare attribute.
    pub fn value_text(&self) -> Option<&'a str> {
        self.value.map(|v| v.text)
    }
}

/// A parsed start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StartTag<'a> {
    /// Byte range of the whole tag (`<` through `>`) in the fragment
    pub span: Range<usize>,
    /// Tag name as written
    pub name: &'a str,
    /// Attributes in source order
    pub attrs: Vec<Attribute<'a>>,
    /// Whitespace between the last attribute and `>` / `/>`
    pub trailing: &'a str,
    /// Whether the tag ends with `/>`
    pub self_closing: bool,
}

impl<'a> StartTag<'a> {
    /// Returns whether this is a `name` element (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the first attribute called `name`.
    pub fn attr(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attrs.iter().find(|a| a.is(name))
    }

    /// Returns whether the tag carries an attribute called `name`.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns the value of `name` if present and non-empty.
    pub fn non_empty_value(&self, name: &str) -> Option<&'a str> {
        self.attr(name)
            .and_then(|a| a.value_text())
            .filter(|v| !v.is_empty())
    }
}

/// Collects every start tag in `fragment`, in source order.
///
/// Malformed tags (unterminated quotes, no closing `>`) are skipped and their
/// `<` treated as text.
pub(crate) fn start_tags(fragment: &str) -> Vec<StartTag<'_>> {
    let lower = fragment.to_ascii_lowercase();
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(offset) = fragment[pos..].find('<') {
        let open = pos + offset;

        if fragment[open..].starts_with("<!--") {
            match fragment[open + 4..].find("-->") {
                Some(end) => {
                    pos = open + 4 + end + 3;
                    continue;
                }
                None => break,
            }
        }

        let Some(tag) = parse_start_tag(fragment, open) else {
            pos = open + 1;
            continue;
        };

        pos = tag.span.end;
        let raw_text = !tag.self_closing
            && RAW_TEXT_ELEMENTS
                .iter()
                .any(|element| tag.name.eq_ignore_ascii_case(element));

        if raw_text {
            let closing = format!("</{}", tag.name.to_ascii_lowercase());
            pos = lower[pos..]
                .find(&closing)
                .map_or(fragment.len(), |end| pos + end);
        }
        tags.push(tag);
    }

    tags
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Parses the start tag whose `<` sits at `start`.
fn parse_start_tag(src: &str, start: usize) -> Option<StartTag<'_>> {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut pos = start + 1;

    if !bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    let name_start = pos;
    while pos < len && is_tag_name_byte(bytes[pos]) {
        pos += 1;
    }
    let name = &src[name_start..pos];
    let mut attrs = Vec::new();

    loop {
        let gap_start = pos;
        while pos < len
            && (bytes[pos].is_ascii_whitespace()
                || (bytes[pos] == b'/' && bytes.get(pos + 1) != Some(&b'>')))
        {
            pos += 1;
        }
        let leading = &src[gap_start..pos];

        match *bytes.get(pos)? {
            b'>' => {
                return Some(StartTag {
                    span: start..pos + 1,
                    name,
                    attrs,
                    trailing: leading,
                    self_closing: false,
                });
            }
            b'/' => {
                return Some(StartTag {
                    span: start..pos + 2,
                    name,
                    attrs,
                    trailing: leading,
                    self_closing: true,
                });
            }
            _ => {}
        }

        let attr_start = pos;
        if bytes[pos] == b'=' {
            pos += 1;
        }
        while pos < len
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        let attr_name = &src[attr_start..pos];

        let mut look = skip_whitespace(bytes, pos);
        let value = if bytes.get(look) == Some(&b'=') {
            look = skip_whitespace(bytes, look + 1);
            match *bytes.get(look)? {
                quote @ (b'"' | b'\'') => {
                    let close = look + 1 + src[look + 1..].find(quote as char)?;
                    pos = close + 1;
                    Some(AttrValue {
                        text: &src[look + 1..close],
                        quote: Some(quote as char),
                    })
                }
                b'>' => {
                    pos = look;
                    Some(AttrValue {
                        text: "",
                        quote: None,
                    })
                }
                _ => {
                    let value_start = look;
                    while look < len && !bytes[look].is_ascii_whitespace() && bytes[look] != b'>' {
                        look += 1;
                    }
                    pos = look;
                    Some(AttrValue {
                        text: &src[value_start..look],
                        quote: None,
                    })
                }
            }
        } else {
            None
        };

        attrs.push(Attribute {
            leading,
            name: attr_name,
            value,
            raw: &src[attr_start..pos],
        });
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
