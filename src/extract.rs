//! Parser for the `KEY: value` replies the agents request from the model.
//!
//! Models wrap the requested lines in code fences, bullets or bold markers
//! and sometimes add prose around them. Only lines that look like a tagged
//! field are kept; the first occurrence of a key wins. Callers validate the
//! mandatory keys and fall back to documented defaults field by field.

use crate::error::{BriefingError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static FIELD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s+)?(?:\*\*)?([A-Za-z][A-Za-z0-9 _]*?)(?:\*\*)?\s*:\s*(.*?)\s*$")
        .expect("field line pattern is valid")
});

/// Values that mean "nothing was specified"
const PLACEHOLDERS: &[&str] = &["", "none", "null", "n/a", "default", "unknown", "unspecified"];

#[derive(Debug, Clone, Default)]
pub struct TaggedFields {
    fields: HashMap<String, String>,
}

fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase().replace(' ', "_")
}

fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_matches(|c| c == '"' || c == '\'' || c == '*' || c == '`')
        .trim()
        .to_string()
}

impl TaggedFields {
    pub fn parse(text: &str) -> Self {
        let mut fields = HashMap::new();
        for line in text.lines() {
            if line.trim_start().starts_with("```") {
                continue;
            }
            if let Some(caps) = FIELD_LINE.captures(line) {
                let key = normalize_key(&caps[1]);
                let value = clean_value(&caps[2]);
                fields.entry(key).or_insert(value);
            }
        }
        Self { fields }
    }

    /// Raw value, present even when it is a placeholder such as `none`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.fields.get(&normalize_key(key)).map(|v| v.as_str())
    }

    /// Value with placeholders treated as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key)
            .filter(|v| !PLACEHOLDERS.contains(&v.to_lowercase().as_str()))
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| BriefingError::parse(key, "missing or empty field"))
    }

    pub fn yes_no(&self, key: &str) -> Result<bool> {
        let value = self
            .raw(key)
            .ok_or_else(|| BriefingError::parse(key, "missing field"))?;
        match value.to_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(true),
            "no" | "n" | "false" => Ok(false),
            other => Err(BriefingError::parse(key, format!("expected yes/no, got '{}'", other))),
        }
    }

    pub fn number<T: std::str::FromStr>(&self, key: &str) -> Result<T> {
        let value = self.require(key)?;
        // tolerate trailing words such as "5 articles"
        let leading = value.split_whitespace().next().unwrap_or(value);
        leading
            .parse()
            .map_err(|_| BriefingError::parse(key, format!("not a number: '{}'", value)))
    }

    /// Names of mandatory keys that are not present at all
    pub fn missing<'a>(&self, keys: &[&'a str]) -> Vec<&'a str> {
        keys.iter()
            .copied()
            .filter(|k| self.raw(k).is_none())
            .collect()
    }
}

/// Take a field or log why its default is used.
pub fn or_default<T>(what: &str, parsed: Result<T>, default: T) -> T {
    match parsed {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Using default for {}: {}", what, e);
            default
        }
    }
}
