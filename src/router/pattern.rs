//! Path patterns: literal segments and named parameter segments.
//!
//! A pattern such as `/dashboard/:userId` is parsed once when the route table
//! is built. Matching then works segment by segment against the request path,
//! with no regex compiled per route.
//!
//! Both `:name` and `{name}` spell a parameter segment.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::PatternError;

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Bound parameters in pattern order.
///
/// Names use `Arc<str>` because they come from the table and are shared by
/// every match; values are per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

static PARAM_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("parameter name regex should be valid")
});

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly
    Literal(String),
    /// Matches any non-empty request segment and binds it under this name
    Param(Arc<str>),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a path template.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern is not absolute, or if a
    /// parameter segment has an empty, non-identifier or repeated name.
    ///
    /// # Example
    ///
    /// ```
    /// use viewrouter::router::PathPattern;
    ///
    /// let pattern = PathPattern::parse("/dashboard/:userId").unwrap();
    /// assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["userId"]);
    /// assert!(PathPattern::parse("/dashboard/:").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::NotAbsolute {
                pattern: raw.to_string(),
            });
        }

        let mut segments = Vec::new();
        for part in split_segments(raw) {
            let param = if let Some(name) = part.strip_prefix(':') {
                Some(name)
            } else if part.starts_with('{') && part.ends_with('}') && part.len() >= 2 {
                Some(&part[1..part.len() - 1])
            } else {
                None
            };

            match param {
                Some("") => {
                    return Err(PatternError::EmptyParamName {
                        pattern: raw.to_string(),
                    })
                }
                Some(name) if !PARAM_NAME_REGEX.is_match(name) => {
                    return Err(PatternError::InvalidParamName {
                        pattern: raw.to_string(),
                        name: name.to_string(),
                    })
                }
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing.as_ref() == name));
                    if duplicate {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(Arc::from(name)));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_ref()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the pattern has at least one parameter segment.
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Param(_)))
    }

    /// Match a request path (no query or hash).
    ///
    /// Each request segment is percent-decoded once before it is compared, so
    /// `/caf%C3%A9` and `/café` match the same literal. Returns the bound
    /// (decoded) parameters on success; a segment that does not decode to
    /// UTF-8 is used raw.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ParamVec> {
        let input = split_segments(path);
        if input.len() != self.segments.len() {
            return None;
        }

        let mut params = ParamVec::new();
        for (segment, raw) in self.segments.iter().zip(input.iter().copied()) {
            let value = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
            match segment {
                Segment::Literal(literal) => {
                    if literal.as_str() != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.push((Arc::clone(name), value.into_owned()));
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path, filling parameters from `value_of`.
    ///
    /// Values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns the name of the first parameter `value_of` has no (non-empty)
    /// value for.
    pub fn build<F>(&self, mut value_of: F) -> Result<String, String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::with_capacity(self.raw.len() + 8);
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => match value_of(name.as_ref()) {
                    Some(value) if !value.is_empty() => {
                        path.push_str(&urlencoding::encode(&value));
                    }
                    _ => return Err(name.to_string()),
                },
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a path into segments.
///
/// The leading `/` is dropped; `""` and `/` have no segments. A trailing
/// slash produces a trailing empty segment, so `/dashboard/` has two.
pub(crate) fn split_segments(path: &str) -> SmallVec<[&str; MAX_INLINE_PARAMS]> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return SmallVec::new();
    }
    trimmed.split('/').collect()
}
