//! Allow-list sanitizer for flat CSS declaration lists.
//!
//! Untrusted `property:value;property:value` text (the grammar of a `style`
//! attribute) is parsed, filtered against a caller-supplied set of permitted
//! property names, and re-serialized as a declaration-block body. Everything
//! that fails to parse or names a property outside the allow-list is dropped
//! silently; the result degrades to fewer declarations, never to an error.
//!
//! Declaration-list grammar: <https://www.w3.org/TR/css-style-attr/#interpreting>

#![forbid(unsafe_code)]

use core::fmt;
use std::collections::HashSet;

/// A single CSS declaration split out of a declaration list.
///
/// The property token keeps the casing the caller wrote (CSS property names
/// are case-insensitive, so `COLOR:red` is as valid as `color:red` and stays
/// readable in output); comparisons against an [`AllowList`] lowercase it on
/// the fly. Both fields are trimmed of surrounding CSS whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name exactly as written, trimmed.
    pub property: String,
    /// Value text after the first colon, trimmed. May itself contain colons.
    pub value: String,
}

impl fmt::Display for Declaration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.property, self.value)
    }
}

/// Set of permitted property names, matched case-insensitively.
///
/// Names are normalized to ASCII lowercase at construction time, so duplicate
/// entries differing only in case collapse to one. An empty allow-list denies
/// everything; [`sanitize`] treats that as the conservative default rather
/// than undefined behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    names: HashSet<String>,
}

impl AllowList {
    /// Build an allow-list from any iterator of property names.
    pub fn new<Iter, Name>(names: Iter) -> Self
    where
        Iter: IntoIterator<Item = Name>,
        Name: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| to_ascii_lowercase(name.as_ref().trim()))
            .collect();
        Self { names }
    }

    /// Whether `property` matches a member, ignoring ASCII case.
    pub fn contains(&self, property: &str) -> bool {
        self.names.contains(&to_ascii_lowercase(property))
    }

    /// True when no property is permitted (deny-all).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of distinct permitted property names.
    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl<Name: AsRef<str>> FromIterator<Name> for AllowList {
    fn from_iter<Iter: IntoIterator<Item = Name>>(names: Iter) -> Self {
        Self::new(names)
    }
}

/// Parse a flat declaration list into its well-formed declarations.
///
/// This is a minimal, resilient parse, deliberately not a CSS tokenizer:
/// - Splits on semicolons (`;`) into declaration items, preserving order.
/// - For each item, splits on the *first* colon (`:`) into property and
///   value, so values containing colons (`url(http://...)`, timestamps)
///   survive intact.
/// - Trims CSS whitespace from both sides of property and value.
/// - Skips empty or invalid items (no colon, or empty property or value
///   after trimming) without reporting them.
///
/// `!important` annotations are not interpreted here; a trailing
/// `!important` simply stays part of the value text.
///
/// Grammar: <https://www.w3.org/TR/css-style-attr/#interpreting>
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    if input.is_empty() {
        return Vec::new();
    }
    let mut declarations: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim_matches(is_css_whitespace);
        if item.is_empty() {
            continue;
        }
        let Some((raw_property, raw_value)) = item.split_once(':') else {
            continue;
        };
        let property = raw_property.trim_matches(is_css_whitespace);
        let value = raw_value.trim_matches(is_css_whitespace);
        if property.is_empty() || value.is_empty() {
            continue;
        }
        declarations.push(Declaration {
            property: property.to_owned(),
            value: value.to_owned(),
        });
    }
    declarations
}

/// Filter an untrusted declaration list down to allow-listed declarations.
///
/// Single pass, stateless, pure: the output contains exactly the well-formed
/// declarations of `raw` whose property name matches `allow` (ignoring ASCII
/// case), in their original relative order, rejoined as `property:value`
/// pairs separated by `;` with no surrounding separators. Property casing is
/// preserved from the input. Duplicate properties are all retained;
/// last-one-wins is the CSS cascade's concern, not this filter's.
///
/// Malformed segments and disallowed properties are dropped without failing
/// the call, so a partially-invalid input still yields every valid, permitted
/// declaration it contains. An input with nothing to retain (the empty
/// string, separator runs like `";;;"`, or any input against an empty
/// allow-list) produces the empty string.
///
/// Re-sanitizing output is a no-op: `sanitize(&sanitize(raw, allow), allow)`
/// equals `sanitize(raw, allow)`.
pub fn sanitize(raw: &str, allow: &AllowList) -> String {
    if raw.is_empty() || allow.is_empty() {
        return String::new();
    }
    let mut output = String::new();
    for declaration in parse_declarations(raw) {
        if !allow.contains(&declaration.property) {
            continue;
        }
        if !output.is_empty() {
            output.push(';');
        }
        output.push_str(&declaration.property);
        output.push(':');
        output.push_str(&declaration.value);
    }
    output
}

/// CSS whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
///
/// Spec: <https://www.w3.org/TR/css-syntax-3/#whitespace>
const fn is_css_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}

/// Lowercase an ASCII identifier without allocating twice when already
/// lowercase turns out to be the common case for property names.
fn to_ascii_lowercase(text: &str) -> String {
    if text.chars().any(|character| character.is_ascii_uppercase()) {
        text.chars()
            .map(|character| character.to_ascii_lowercase())
            .collect()
    } else {
        text.to_owned()
    }
}
