//! Field paths into records
//!
//! A constraint names its target field with a path. Plain field names are
//! single-segment paths; nested fields and array elements are reached with
//! dotted keys and bracketed indices:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Top-level field | `status` |
//! | `.key` | Same, leading dot allowed | `.status` |
//! | `key1.key2` | Nested field | `user.name` |
//! | `key[n]` | Field then array index | `tags[0]` |
//! | `key[n].key` | Mixed | `items[0].sku` |
//! | `["key"]` | Quoted key, JSON string escapes | `["a.b"]`, `meta["x[1]"]` |
//!
//! A plain key runs until the next `.`, `[` or `]`, so `first name` and
//! `user@host` are single keys. Keys holding those delimiters, and the
//! empty key, need the quoted form. `Display` emits it whenever required,
//! so every path survives a print-then-parse round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for field path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// The path string was empty
    #[error("empty field path")]
    Empty,
    /// Empty key in path
    #[error("empty key in path at position {0}")]
    EmptyKey(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    /// Quoted key without a closing quote
    #[error("unterminated quoted key starting at position {0}")]
    UnterminatedQuote(usize),
    /// Quoted key that is not a valid JSON string literal
    #[error("invalid quoted key at position {0}: {1}")]
    InvalidQuotedKey(usize, String),
}

/// A segment in a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object key: `.foo` or `["foo"]`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

impl PathSegment {
    /// True if this key can only be written in the quoted form
    fn needs_quoting(&self) -> bool {
        match self {
            PathSegment::Key(k) => k.is_empty() || !k.chars().all(is_key_char),
            PathSegment::Index(_) => false,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) if self.needs_quoting() => {
                write!(f, "[{}]", Value::String(k.clone()))
            }
            PathSegment::Key(k) => write!(f, ".{}", k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A non-empty path to a field inside a record
///
/// # Examples
///
/// ```
/// use recstore_core::FieldPath;
///
/// let path: FieldPath = "user.address.city".parse().unwrap();
/// assert_eq!(path.len(), 3);
///
/// let built = FieldPath::key("items").index(0).then_key("sku");
/// assert_eq!(built.to_string(), "items[0].sku");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Single-segment path naming a top-level field
    pub fn key(key: impl Into<String>) -> Self {
        FieldPath {
            segments: vec![PathSegment::Key(key.into())],
        }
    }

    /// Append a key segment (builder pattern)
    pub fn then_key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments; always at least one
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a field path names at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve this path against a value, descending through objects and arrays.
    ///
    /// Returns `None` when any segment is missing or hits the wrong kind of value.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for seg in &self.segments {
            current = match (seg, current) {
                (PathSegment::Key(k), Value::Object(map)) => map.get(k)?,
                (PathSegment::Index(i), Value::Array(items)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolve this path against the fields of a record
    pub fn resolve_in<'a>(
        &self,
        fields: &'a serde_json::Map<String, Value>,
    ) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = match first {
            PathSegment::Key(k) => fields.get(k)?,
            PathSegment::Index(_) => return None,
        };
        for seg in rest {
            current = match (seg, current) {
                (PathSegment::Key(k), Value::Object(map)) => map.get(k)?,
                (PathSegment::Index(i), Value::Array(items)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut segments = Vec::new();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;

        if chars[i] == '.' {
            i += 1;
            if i >= chars.len() {
                return Err(PathParseError::EmptyKey(i));
            }
        }

        while i < chars.len() {
            if chars[i] == '.' {
                i += 1;
                if i >= chars.len() || chars[i] == '.' || chars[i] == '[' {
                    return Err(PathParseError::EmptyKey(i));
                }
            }

            if chars[i] == '[' && chars.get(i + 1) == Some(&'"') {
                let start = i;
                let quote_start = i + 1;
                let mut j = quote_start + 1;
                while j < chars.len() && chars[j] != '"' {
                    j += if chars[j] == '\\' { 2 } else { 1 };
                }
                if j >= chars.len() {
                    return Err(PathParseError::UnterminatedQuote(quote_start));
                }

                let literal: String = chars[quote_start..=j].iter().collect();
                let key = serde_json::from_str::<String>(&literal)
                    .map_err(|e| PathParseError::InvalidQuotedKey(quote_start, e.to_string()))?;

                i = j + 1;
                if chars.get(i) != Some(&']') {
                    return Err(PathParseError::UnclosedBracket(start));
                }
                segments.push(PathSegment::Key(key));
                i += 1;
            } else if chars[i] == '[' {
                let start = i;
                i += 1;
                let idx_start = i;

                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }

                if i >= chars.len() {
                    return Err(PathParseError::UnclosedBracket(start));
                }

                let idx_str: String = chars[idx_start..i].iter().collect();
                let idx = idx_str
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex(idx_start, idx_str))?;

                segments.push(PathSegment::Index(idx));
                i += 1;
            } else if is_key_char(chars[i]) {
                let key_start = i;
                while i < chars.len() && is_key_char(chars[i]) {
                    i += 1;
                }
                let key: String = chars[key_start..i].iter().collect();
                segments.push(PathSegment::Key(key));
            } else {
                return Err(PathParseError::UnexpectedChar(chars[i], i));
            }
        }

        Ok(FieldPath { segments })
    }
}

fn is_key_char(c: char) -> bool {
    !matches!(c, '.' | '[' | ']')
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Key(k) if n == 0 && !seg.needs_quoting() => write!(f, "{}", k)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_key() {
        let path: FieldPath = "status".parse().unwrap();
        assert_eq!(path, FieldPath::key("status"));
    }

    #[test]
    fn test_parse_leading_dot() {
        let path: FieldPath = ".status".parse().unwrap();
        assert_eq!(path, FieldPath::key("status"));
    }

    #[test]
    fn test_parse_nested_and_index() {
        let path: FieldPath = "items[2].sku".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("items".into()),
                PathSegment::Index(2),
                PathSegment::Key("sku".into()),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<FieldPath>(), Err(PathParseError::Empty));
        assert!(matches!(
            "a..b".parse::<FieldPath>(),
            Err(PathParseError::EmptyKey(_))
        ));
        assert!(matches!(
            "a.".parse::<FieldPath>(),
            Err(PathParseError::EmptyKey(_))
        ));
        assert!(matches!(
            "a[1".parse::<FieldPath>(),
            Err(PathParseError::UnclosedBracket(1))
        ));
        assert!(matches!(
            "a[x]".parse::<FieldPath>(),
            Err(PathParseError::InvalidIndex(_, _))
        ));
        assert!(matches!(
            "a]b".parse::<FieldPath>(),
            Err(PathParseError::UnexpectedChar(']', 1))
        ));
        assert!(matches!(
            "a[\"b".parse::<FieldPath>(),
            Err(PathParseError::UnterminatedQuote(2))
        ));
        assert!(matches!(
            "a[\"b\"".parse::<FieldPath>(),
            Err(PathParseError::UnclosedBracket(1))
        ));
        assert!(matches!(
            "a[\"\\q\"]".parse::<FieldPath>(),
            Err(PathParseError::InvalidQuotedKey(2, _))
        ));
    }

    #[test]
    fn test_parse_free_form_keys() {
        for key in ["first name", "user@host", "a:b", "caf\u{e9}", "#tag", "$id"] {
            let path: FieldPath = key.parse().unwrap();
            assert_eq!(path, FieldPath::key(key));
            assert_eq!(path.to_string(), key);
        }
        let nested: FieldPath = "user.first name".parse().unwrap();
        assert_eq!(nested, FieldPath::key("user").then_key("first name"));
    }

    #[test]
    fn test_parse_quoted_keys() {
        let path: FieldPath = "[\"a.b\"]".parse().unwrap();
        assert_eq!(path, FieldPath::key("a.b"));

        let path: FieldPath = "meta[\"x[1]\"].y".parse().unwrap();
        assert_eq!(
            path,
            FieldPath::key("meta").then_key("x[1]").then_key("y")
        );

        let path: FieldPath = "[\"say \\\"hi\\\"\"][0]".parse().unwrap();
        assert_eq!(path, FieldPath::key("say \"hi\"").index(0));

        let path: FieldPath = "[\"\"]".parse().unwrap();
        assert_eq!(path, FieldPath::key(""));
    }

    #[test]
    fn test_display_quotes_keys_with_delimiters() {
        assert_eq!(FieldPath::key("a.b").to_string(), "[\"a.b\"]");
        assert_eq!(
            FieldPath::key("meta").then_key("x]").index(2).to_string(),
            "meta[\"x]\"][2]"
        );
        assert_eq!(FieldPath::key("").to_string(), "[\"\"]");
        assert_eq!(
            FieldPath::key("q").then_key("a\"[b").to_string(),
            "q[\"a\\\"[b\"]"
        );
    }

    #[test]
    fn test_built_paths_roundtrip_through_parse() {
        let paths = [
            FieldPath::key("a.b"),
            FieldPath::key("first name").then_key("x.y").index(3),
            FieldPath::key("").then_key("]"),
            FieldPath::key("q").then_key("a\"[b").then_key("\\"),
            FieldPath::key("[0]"),
        ];
        for path in paths {
            let reparsed: FieldPath = path.to_string().parse().unwrap();
            assert_eq!(reparsed, path);
        }
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for s in ["a", "a.b.c", "tags[0]", "items[3].sku", "$id"] {
            let path: FieldPath = s.parse().unwrap();
            assert_eq!(path.to_string(), s);
        }
    }

    #[test]
    fn test_resolve_nested() {
        let doc = json!({"user": {"name": "ada", "tags": ["x", "y"]}});
        let name: FieldPath = "user.name".parse().unwrap();
        let tag: FieldPath = "user.tags[1]".parse().unwrap();
        assert_eq!(name.resolve(&doc), Some(&json!("ada")));
        assert_eq!(tag.resolve(&doc), Some(&json!("y")));
    }

    #[test]
    fn test_resolve_missing_or_mismatched() {
        let doc = json!({"user": {"name": "ada"}, "n": 1});
        let missing: FieldPath = "user.email".parse().unwrap();
        let through_scalar: FieldPath = "n.x".parse().unwrap();
        let out_of_bounds: FieldPath = "user[0]".parse().unwrap();
        assert!(missing.resolve(&doc).is_none());
        assert!(through_scalar.resolve(&doc).is_none());
        assert!(out_of_bounds.resolve(&doc).is_none());
    }

    #[test]
    fn test_serde_as_string() {
        let path: FieldPath = serde_json::from_value(json!("a.b")).unwrap();
        assert_eq!(path, FieldPath::key("a").then_key("b"));
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("a.b"));
        assert!(serde_json::from_value::<FieldPath>(json!("")).is_err());

        let dotted_key = FieldPath::key("a.b");
        let encoded = serde_json::to_value(&dotted_key).unwrap();
        assert_eq!(encoded, json!("[\"a.b\"]"));
        assert_eq!(
            serde_json::from_value::<FieldPath>(encoded).unwrap(),
            dotted_key
        );
    }
}
