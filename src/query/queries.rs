//! Parsed, comma-expanded query values.
//!
//! # Design Decisions
//! - Each raw value is split on `,` and the pieces are appended in order:
//!   `a=1,2&a=3` gives `a -> [1, 2, 3]`
//! - A key whose values are all empty strings is kept, but `get` treats it
//!   as absent and returns the caller's default. `get_all` still shows
//!   blank values as they were split, so `a=` appears as `a -> [""]`
//! - Malformed escapes and `;` separators are rejected rather than passed
//!   through

use std::collections::HashMap;

use url::form_urlencoded;

use crate::query::error::QueryError;

/// Query key → ordered values for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queries {
    values: HashMap<String, Vec<String>>,
}

impl Queries {
    /// Parse a raw query string (without the leading `?`).
    pub fn extract(raw: &str) -> Result<Self, QueryError> {
        validate(raw)?;

        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            values
                .entry(key.into_owned())
                .or_default()
                .extend(value.split(',').map(str::to_string));
        }
        Ok(Self { values })
    }

    /// Returns the values of `key` if at least one is non-empty, else `default`.
    pub fn get<'a>(&'a self, key: &str, default: &'a [String]) -> &'a [String] {
        match self.values.get(key) {
            Some(values) if values.iter().any(|v| !v.is_empty()) => values,
            _ => default,
        }
    }

    /// Every key with its values, including keys whose values are all empty.
    pub fn get_all(&self) -> &HashMap<String, Vec<String>> {
        &self.values
    }

    /// Number of distinct keys.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn validate(raw: &str) -> Result<(), QueryError> {
    for segment in raw.split('&') {
        if segment.contains(';') {
            return Err(QueryError::InvalidSemicolon);
        }

        let bytes = segment.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            let well_formed = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                let escape: String = segment[i..].chars().take(3).collect();
                return Err(QueryError::InvalidEscape(escape));
            }
            i += 3;
        }
    }
    Ok(())
}
