//! The `@translate(...)` directive
//!
//! ```text
//! @translate(references.0).as(<doctype>)[.ext(<ext>)][.v(<n>)][.rel(<relation>)]
//! ```
//!
//! Keywords are case-insensitive and modifiers may appear in any order.
//! [`TranslateDirective`] is the parsed form; parsing is a small cursor over
//! the text so every error can name exactly what was wrong.

use crate::error::PathError;
use serde::Serialize;
use std::str::FromStr;

/// Keyword that opens a translation directive
pub const TRANSLATE_KEYWORD: &str = "@translate(";

/// Check whether a string is a translation directive (case-insensitive)
#[must_use]
pub fn is_translate_directive(text: &str) -> bool {
    text.get(..TRANSLATE_KEYWORD.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(TRANSLATE_KEYWORD))
}

/// Which upstream reference a directive derives from
///
/// Only the first entry of the reference list is supported, so after
/// parsing this is always `references.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ReferenceSource {
    pub index: usize,
}

/// Parsed `@translate(...)` directive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TranslateDirective {
    pub source: ReferenceSource,
    /// From `.as(...)`
    pub doctype: String,
    /// From `.ext(...)`, leading dot dropped
    pub ext: Option<String>,
    /// From `.v(n)`, always >= 1
    pub start_variant: Option<u32>,
    /// From `.rel(...)`, trimmed and unquoted
    pub rel: Option<String>,
}

impl TranslateDirective {
    /// Create directive for `references.0` with the given doctype
    #[inline]
    #[must_use]
    pub fn new(doctype: impl Into<String>) -> Self {
        Self {
            source: ReferenceSource::default(),
            doctype: doctype.into(),
            ext: None,
            start_variant: None,
            rel: None,
        }
    }

    /// With extension override
    #[inline]
    #[must_use]
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// With starting variant
    #[inline]
    #[must_use]
    pub fn with_start_variant(mut self, variant: u32) -> Self {
        self.start_variant = Some(variant);
        self
    }

    /// With relation
    #[inline]
    #[must_use]
    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Parse directive text
    ///
    /// # Errors
    /// - `PathError::MissingDoctype` if `.as(...)` is absent
    /// - `PathError::UnsupportedSource` / `UnsupportedReferenceIndex` for
    ///   anything but `references.0`
    /// - `PathError::InvalidStartVariant` for `.v(n)` with `n < 1`
    /// - `PathError::MalformedDirective` for everything else off-grammar
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let mut cur = Cursor::new(text.trim());

        if !cur.eat_keyword("@translate") {
            return Err(PathError::malformed(text, "expected '@translate('"));
        }
        cur.skip_ws();
        if !cur.eat('(') {
            return Err(PathError::malformed(text, "expected '(' after @translate"));
        }
        let source = parse_source(text, cur.group(text)?)?;

        let mut doctype = None;
        let mut ext = None;
        let mut start_variant = None;
        let mut rel = None;

        loop {
            cur.skip_ws();
            if cur.is_done() {
                break;
            }
            if !cur.eat('.') {
                return Err(PathError::malformed(
                    text,
                    format!("unexpected '{}'", cur.rest()),
                ));
            }
            let name = cur.ident();
            cur.skip_ws();
            if name.is_empty() || !cur.eat('(') {
                return Err(PathError::malformed(
                    text,
                    format!("expected .<modifier>(...) at '.{}'", cur.rest()),
                ));
            }
            let arg = cur.group(text)?;

            match name.to_ascii_lowercase().as_str() {
                "as" => {
                    let value = unquote(arg.trim());
                    if value.is_empty() {
                        return Err(PathError::malformed(text, ".as() needs a doctype"));
                    }
                    set_once(text, "as", &mut doctype, value.to_string())?;
                }
                "ext" => {
                    let value = unquote(arg.trim());
                    let value = value.strip_prefix('.').unwrap_or(value);
                    if value.is_empty() {
                        return Err(PathError::malformed(text, ".ext() needs an extension"));
                    }
                    set_once(text, "ext", &mut ext, value.to_string())?;
                }
                "v" => {
                    let value = parse_start_variant(text, arg)?;
                    set_once(text, "v", &mut start_variant, value)?;
                }
                "rel" => {
                    let value = unquote(arg.trim()).to_string();
                    set_once(text, "rel", &mut rel, value)?;
                }
                other => {
                    return Err(PathError::malformed(
                        text,
                        format!("unknown modifier .{other}()"),
                    ));
                }
            }
        }

        let doctype = doctype.ok_or_else(|| PathError::MissingDoctype {
            directive: text.to_string(),
        })?;

        Ok(Self {
            source,
            doctype,
            ext,
            start_variant,
            rel,
        })
    }
}

impl FromStr for TranslateDirective {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_source(directive: &str, raw: &str) -> Result<ReferenceSource, PathError> {
    let raw = raw.trim();
    let unsupported = || PathError::UnsupportedSource {
        directive: directive.to_string(),
        reference: raw.to_string(),
    };

    let (head, index) = raw.split_once('.').ok_or_else(unsupported)?;
    if !head.trim().eq_ignore_ascii_case("references") {
        return Err(unsupported());
    }
    let index = index.trim();
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unsupported());
    }
    if index.bytes().any(|b| b != b'0') {
        return Err(PathError::UnsupportedReferenceIndex {
            directive: directive.to_string(),
            index: index.to_string(),
        });
    }
    Ok(ReferenceSource { index: 0 })
}

fn parse_start_variant(directive: &str, raw: &str) -> Result<u32, PathError> {
    let value = unquote(raw.trim());
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(PathError::InvalidStartVariant {
            directive: directive.to_string(),
            value: value.to_string(),
        }),
    }
}

fn set_once<T>(directive: &str, name: &str, slot: &mut Option<T>, value: T) -> Result<(), PathError> {
    if slot.is_some() {
        return Err(PathError::malformed(
            directive,
            format!(".{name}() given more than once"),
        ));
    }
    *slot = Some(value);
    Ok(())
}

/// Strip one pair of matching surrounding quotes
fn unquote(s: &str) -> &str {
    for q in ['"', '\'', '`'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let matched = self
            .rest()
            .get(..keyword.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(keyword));
        if matched {
            self.pos += keyword.len();
        }
        matched
    }

    fn ident(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Body of a parenthesized group; the opening `(` is already consumed
    ///
    /// Nested parentheses balance. A quote opening the argument starts a
    /// literal section; quotes elsewhere are ordinary characters.
    fn group(&mut self, directive: &str) -> Result<&'a str, PathError> {
        let rest = self.rest();
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut at_start = true;

        for (i, c) in rest.char_indices() {
            let leading = at_start;
            if !c.is_whitespace() {
                at_start = false;
            }
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'' | '`') if leading => quote = Some(c),
                (None, '(') => depth += 1,
                (None, ')') if depth == 0 => {
                    self.pos += i + 1;
                    return Ok(&rest[..i]);
                }
                (None, ')') => depth -= 1,
                (None, _) => {}
            }
        }
        Err(PathError::malformed(directive, "unbalanced parentheses"))
    }
}
