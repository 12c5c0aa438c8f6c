use core::fmt;

use std::error;

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// Attempted to insert a path that conflicts with an existing route.
    Conflict {
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
    /// Routes must begin with `/`.
    MissingLeadingSlash,
    /// Only one parameter is allowed per route segment.
    TooManyParams,
    /// Parameters must be registered with a name.
    UnnamedParam,
    /// Catch-all parameters are only allowed at the end of a route and must follow a `/`.
    InvalidCatchAll,
    /// The same parameter name is used more than once in a single route.
    DuplicateParam {
        /// The repeated parameter name.
        name: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { with } => {
                write!(
                    f,
                    "insertion failed due to conflict with previously registered route: {with}",
                )
            }
            Self::MissingLeadingSlash => f.write_str("routes must begin with '/'"),
            Self::TooManyParams => f.write_str("only one parameter is allowed per path segment"),
            Self::UnnamedParam => f.write_str("parameters must be registered with a name"),
            Self::InvalidCatchAll => {
                f.write_str("catch-all parameters are only allowed at the end of a route, directly after a '/'")
            }
            Self::DuplicateParam { name } => write!(f, "parameter name '{name}' is used more than once"),
        }
    }
}

impl error::Error for InsertError {}

impl InsertError {
    pub(crate) fn conflict(with: &str) -> Self {
        InsertError::Conflict { with: with.into() }
    }
}

/// A failed match attempt.
///
/// The path did not lead to any registered route.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MatchError;

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("match error: route not found")
    }
}

impl error::Error for MatchError {}
