//! Route pattern parsing.
//!
//! A route is literal text with two kinds of wildcards:
//!
//! - `:name` matches a single, non-empty path segment.
//! - `*name` matches the non-empty remainder of the path and must end the route.
//!
//! A wildcard name runs until the next `/` or the end of the route.

use crate::InsertError;

/// One component of a parsed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, matched byte for byte.
    Static(&'a str),
    /// A named parameter (`:name`).
    Param(&'a str),
    /// A named catch-all (`*name`).
    CatchAll(&'a str),
}

/// A route decomposed into its static and wildcard segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> RoutePattern<'a> {
    /// Parse and validate a route.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use switchyard_router::pattern::{RoutePattern, Segment};
    ///
    /// let pattern = RoutePattern::parse("/user/:id/*rest").unwrap();
    /// assert_eq!(
    ///     pattern.segments(),
    ///     &[
    ///         Segment::Static("/user/"),
    ///         Segment::Param("id"),
    ///         Segment::Static("/"),
    ///         Segment::CatchAll("rest"),
    ///     ]
    /// );
    /// ```
    pub fn parse(route: &'a str) -> Result<Self, InsertError> {
        if !route.starts_with('/') {
            return Err(InsertError::MissingLeadingSlash);
        }

        let bytes = route.as_bytes();
        let mut segments = Vec::new();
        let mut names = Vec::<&str>::new();

        // start of the pending static run.
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            let sigil = bytes[i];
            if sigil != b':' && sigil != b'*' {
                i += 1;
                continue;
            }

            if start < i {
                segments.push(Segment::Static(&route[start..i]));
            }

            let end = bytes[i + 1..]
                .iter()
                .position(|&b| b == b'/')
                .map(|p| i + 1 + p)
                .unwrap_or(bytes.len());

            let name = &route[i + 1..end];

            if name.is_empty() {
                return Err(InsertError::UnnamedParam);
            }

            // `/:a:b` or `/:a*b`.
            if name.contains([':', '*']) {
                return Err(InsertError::TooManyParams);
            }

            if names.contains(&name) {
                return Err(InsertError::DuplicateParam { name: name.into() });
            }
            names.push(name);

            if sigil == b'*' {
                // route starts with '/' so i is never 0 here.
                if end != bytes.len() || bytes[i - 1] != b'/' {
                    return Err(InsertError::InvalidCatchAll);
                }
                segments.push(Segment::CatchAll(name));
            } else {
                segments.push(Segment::Param(name));
            }

            i = end;
            start = end;
        }

        if start < bytes.len() {
            segments.push(Segment::Static(&route[start..]));
        }

        Ok(Self { segments })
    }

    /// The segments of this pattern in left-to-right order.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Names of all wildcards in this pattern in left-to-right order.
    pub fn param_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|segment| match *segment {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn static_only() {
        let pattern = RoutePattern::parse("/a/b/c").unwrap();
        assert_eq!(pattern.segments(), &[Segment::Static("/a/b/c")]);
        assert_eq!(pattern.param_names().count(), 0);
    }

    #[test]
    fn param_inside_segment() {
        let pattern = RoutePattern::parse("/user_:name/x").unwrap();
        assert_eq!(
            pattern.segments(),
            &[Segment::Static("/user_"), Segment::Param("name"), Segment::Static("/x")]
        );
    }

    #[test]
    fn trailing_param() {
        let pattern = RoutePattern::parse("/:a/:b").unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn invalid() {
        assert_eq!(RoutePattern::parse("a/b"), Err(InsertError::MissingLeadingSlash));
        assert_eq!(RoutePattern::parse(""), Err(InsertError::MissingLeadingSlash));
        assert_eq!(RoutePattern::parse("/user/:"), Err(InsertError::UnnamedParam));
        assert_eq!(RoutePattern::parse("/src/*"), Err(InsertError::UnnamedParam));
        assert_eq!(RoutePattern::parse("/:a:b"), Err(InsertError::TooManyParams));
        assert_eq!(RoutePattern::parse("/:a*b"), Err(InsertError::TooManyParams));
        assert_eq!(RoutePattern::parse("/src/*path/x"), Err(InsertError::InvalidCatchAll));
        assert_eq!(RoutePattern::parse("/src*path"), Err(InsertError::InvalidCatchAll));
        assert_eq!(
            RoutePattern::parse("/:id/x/:id"),
            Err(InsertError::DuplicateParam { name: "id".into() })
        );
        assert_eq!(
            RoutePattern::parse("/:id/*id"),
            Err(InsertError::DuplicateParam { name: "id".into() })
        );
    }
}
