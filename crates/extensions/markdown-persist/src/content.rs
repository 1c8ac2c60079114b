//! Content values and their Markdown rendering.

use std::fmt;

/// A value to be recorded as Markdown.
///
/// Rendering never fails: anything that is not text, a list or a mapping is
/// carried as [`Content::Opaque`] with its string representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Already-rendered text, written verbatim.
    Text(String),
    /// Ordered items, one bullet each.
    Sequence(Vec<Content>),
    /// Ordered key/value pairs, one bold-key bullet each.
    Mapping(Vec<(String, Content)>),
    /// String representation of some other object, written under a header.
    Opaque(String),
}

impl Content {
    /// Text content.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// A sequence from anything convertible to content.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Content>,
    {
        Content::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// A mapping, keeping the iteration order of `entries`.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Content>,
    {
        Content::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Opaque content from a value's `Display` form.
    pub fn opaque(value: impl fmt::Display) -> Self {
        Content::Opaque(value.to_string())
    }

    /// Opaque content from a value's `Debug` form.
    pub fn from_debug(value: &impl fmt::Debug) -> Self {
        Content::Opaque(format!("{:?}", value))
    }

    /// Render as a Markdown fragment.
    ///
    /// `header_level` only affects [`Content::Opaque`]. It is not clamped:
    /// values outside 1..=6 produce whatever that many `#` characters give.
    pub fn to_markdown(&self, header_level: u8) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Sequence(items) => items
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            Content::Mapping(entries) => entries
                .iter()
                .map(|(key, value)| format!("- **{}**: {}", key, value))
                .collect::<Vec<_>>()
                .join("\n"),
            Content::Opaque(text) => {
                format!("{} Content\n\n{}", "#".repeat(header_level as usize), text)
            }
        }
    }

    /// Write the quoted form used for items nested inside a list or mapping.
    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => write_quoted(f, text),
            other => write!(f, "{}", other),
        }
    }
}

/// The flat string form: text as-is, nested structures as `['a', 'b']` or
/// `{'k': 'v'}`.
impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) | Content::Opaque(text) => f.write_str(text),
            Content::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_nested(f)?;
                }
                f.write_str("]")
            }
            Content::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, key)?;
                    f.write_str(": ")?;
                    value.write_nested(f)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Single-quote a string, switching to double quotes when it contains a
/// single quote but no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    f.write_str(&out)
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(items: Vec<T>) -> Self {
        Content::sequence(items)
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Content::Text(text),
            serde_json::Value::Array(items) => Content::sequence(items),
            serde_json::Value::Object(map) => Content::mapping(map),
            other => Content::Opaque(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
