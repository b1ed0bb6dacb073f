//! Entity exclusion rules
//!
//! An entity is excluded when its fully-qualified name is listed in the
//! exclude classes, or when it matches the exclude pattern. The class list
//! is consulted first, so a name matching both reports [`Exclusion::ByClass`].

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::names;

/// Which rule excluded an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum Exclusion {
    /// Listed in the exclude classes
    ByClass,
    /// Matched the exclude pattern (holds the pattern source)
    ByPattern(String),
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByClass => write!(f, "listed in ignore.classes"),
            Self::ByPattern(pattern) => write!(f, "matches ignore.regex {}", pattern),
        }
    }
}

/// Exclude list plus optional pattern
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    classes: Vec<String>,
    pattern: Option<Regex>,
}

impl ExclusionFilter {
    /// Build a filter from exact class names and an optional compiled pattern
    pub fn new(classes: impl IntoIterator<Item = impl AsRef<str>>, pattern: Option<Regex>) -> Self {
        Self {
            classes: classes
                .into_iter()
                .map(|c| names::normalize(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
            pattern,
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusion(name).is_some()
    }

    /// The rule that excludes `name`, if any
    pub fn exclusion(&self, name: &str) -> Option<Exclusion> {
        if self.classes.iter().any(|c| c == name) {
            return Some(Exclusion::ByClass);
        }

        match self.pattern {
            Some(ref re) if re.is_match(name) => Some(Exclusion::ByPattern(re.as_str().to_string())),
            _ => None,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

/// Compile an exclude pattern
///
/// Accepts a bare regex (`Interface$`) or a delimited one with trailing
/// flags (`/interface$/i`, `#...#`, `~...~`). Flags `i`, `m`, `s` and `x`
/// become an inline group.
pub fn parse_pattern(source: &str) -> Result<Regex> {
    let source = source.trim();
    if source.is_empty() {
        return Err(Error::Config("ignore.regex must not be empty".to_string()));
    }

    let (body, flags) = split_delimited(source).unwrap_or((source, ""));

    if let Some(bad) = flags.chars().find(|c| !matches!(c, 'i' | 'm' | 's' | 'x')) {
        return Err(Error::Config(format!(
            "Unsupported regex flag '{}' in {}",
            bad, source
        )));
    }

    let pattern = if flags.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", flags, body)
    };

    Ok(Regex::new(&pattern)?)
}

/// Split `/body/flags` into `(body, flags)`
fn split_delimited(source: &str) -> Option<(&str, &str)> {
    let delim = source.chars().next()?;
    if !matches!(delim, '/' | '#' | '~') {
        return None;
    }

    let end = source.rfind(delim)?;
    if end == 0 {
        return None;
    }

    let flags = &source[end + 1..];
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some((&source[1..end], flags))
}
