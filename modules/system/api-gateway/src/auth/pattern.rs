//! Route patterns.
//!
//! A pattern is compiled once and matched against raw request paths segment by
//! segment. Paths containing `.` or `..` segments never match, so a public
//! prefix cannot be used to reach a protected page.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("route pattern '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("route pattern '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("route pattern '{0}' has an unnamed placeholder")]
    EmptyPlaceholder(String),

    #[error("route pattern '{0}': a wildcard may only be the whole last segment")]
    MisplacedWildcard(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
    wildcard: bool,
}

impl RoutePattern {
    /// Compile a template.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] for relative templates, empty segments,
    /// unnamed placeholders and wildcards anywhere but the whole last segment.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let Some(rest) = template.strip_prefix('/') else {
            return Err(PatternError::NotAbsolute(template.to_owned()));
        };

        let mut segments = Vec::new();
        let mut wildcard = false;

        if !rest.is_empty() {
            let parts: Vec<&str> = rest.split('/').collect();
            let last = parts.len() - 1;

            for (i, part) in parts.into_iter().enumerate() {
                if part == "*" || part == "**" {
                    if i != last {
                        return Err(PatternError::MisplacedWildcard(template.to_owned()));
                    }
                    wildcard = true;
                } else if part.contains('*') {
                    return Err(PatternError::MisplacedWildcard(template.to_owned()));
                } else if part.is_empty() {
                    return Err(PatternError::EmptySegment(template.to_owned()));
                } else if let Some(name) = placeholder_name(part) {
                    if name.is_empty() {
                        return Err(PatternError::EmptyPlaceholder(template.to_owned()));
                    }
                    segments.push(Segment::Param);
                } else {
                    segments.push(Segment::Literal(part.to_owned()));
                }
            }
        }

        Ok(Self {
            template: template.to_owned(),
            segments,
            wildcard,
        })
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether `path` (without query) matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.iter().any(|p| *p == "." || *p == "..") {
            return false;
        }

        if self.segments.is_empty() && !self.wildcard {
            return rest.is_empty();
        }

        let len_ok = if self.wildcard {
            parts.len() > self.segments.len()
        } else {
            parts.len() == self.segments.len()
        };

        len_ok
            && self
                .segments
                .iter()
                .zip(&parts)
                .all(|(segment, part)| match segment {
                    Segment::Literal(lit) => lit.as_str() == *part,
                    Segment::Param => !part.is_empty(),
                })
    }
}

fn placeholder_name(part: &str) -> Option<&str> {
    part.strip_prefix('{')
        .and_then(|p| p.strip_suffix('}'))
        .or_else(|| part.strip_prefix(':'))
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Whether any of `patterns` matches `path`.
#[must_use]
pub fn any_match(patterns: &[RoutePattern], path: &str) -> bool {
    patterns.iter().any(|p| p.matches(path))
}
