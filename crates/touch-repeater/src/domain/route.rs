//! Connection route parsing.
//!
//! A client selects its sink by the path it connects with, e.g.:
//!
//! ```text
//! /console
//! /mouse?screen=1
//! /tuio?host=10.0.0.5&port=5000
//! ```
//!
//! The path is lower-cased once on arrival; sink selection matches the path
//! prefix and the optional arguments are collected into a flat key→value
//! table.  Argument extraction scans the *whole* path for token runs
//! (anything that is not `?`, `=`, or `&`), so the leading path segment
//! itself shows up as a key with an empty value; harmless, and it keeps
//! the scan free of special cases.  A key without `=value` maps to the
//! empty string; a repeated key keeps its last value.

use std::collections::HashMap;

/// A parsed connection route: the lower-cased path plus its argument table.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// The full request path, lower-cased.
    pub path: String,
    /// Flat key→value argument table extracted from the path.
    pub args: HashMap<String, String>,
}

impl Route {
    /// Parses a request path into a route.
    pub fn parse(raw_path: &str) -> Route {
        let path = raw_path.to_lowercase();
        let args = parse_args(&path);
        Route { path, args }
    }

    /// Returns the value for `key`, if the path supplied one.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }
}

/// Scans `path` for `key[=value]` token runs.
///
/// Equivalent to collecting every match of `([^?=&]+)(=([^&]*))?`: a key is
/// a maximal run of non-separator characters; if it is directly followed by
/// `=`, the value runs up to the next `&` (and may itself contain `?` or
/// `=`).
fn parse_args(path: &str) -> HashMap<String, String> {
    fn is_separator(c: char) -> bool {
        matches!(c, '?' | '=' | '&')
    }

    let mut args = HashMap::new();
    let mut cursor = 0;

    while cursor < path.len() {
        // Skip to the start of the next key token.
        match path[cursor..].find(|c: char| !is_separator(c)) {
            Some(offset) => cursor += offset,
            None => break,
        }

        let key_end = path[cursor..]
            .find(is_separator)
            .map(|offset| cursor + offset)
            .unwrap_or(path.len());
        let key = &path[cursor..key_end];
        cursor = key_end;

        let mut value = "";
        if path[cursor..].starts_with('=') {
            cursor += 1;
            let value_end = path[cursor..]
                .find('&')
                .map(|offset| cursor + offset)
                .unwrap_or(path.len());
            value = &path[cursor..value_end];
            cursor = value_end;
        }

        args.insert(key.to_string(), value.to_string());
    }

    args
}

// ── Tests ─────────────────────────────────────────────────────────────────────
