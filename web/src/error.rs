//! Error types produced while dispatching to handlers and controller methods.
//!
//! Registration errors are [InsertError](crate::InsertError) from the underlying router. Lookup
//! outcomes such as not found or method not allowed are not errors. They are variants of
//! [Lookup](crate::Lookup).

use core::fmt;

use std::error;

/// Type-erased error returned by user methods and handlers.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

/// Errors that can occur when invoking a handler or a controller method by name.
pub enum DispatchError {
    /// The named method does not exist in the controller's dispatch table.
    MethodNotFound {
        /// Type name of the controller.
        controller: &'static str,
        /// The name that failed to resolve.
        method: String,
    },
    /// The method was called with the wrong number of arguments.
    ArgumentMismatch {
        /// Name of the called method.
        method: String,
        /// Number of arguments the method takes.
        expected: usize,
        /// Number of arguments given.
        found: usize,
    },
    /// An argument at the given position has a type the method does not accept.
    ArgumentType {
        /// Name of the called method.
        method: String,
        /// Zero based position of the offending argument.
        position: usize,
    },
    /// Failure signalled by the method or handler itself.
    Handler(BoxError),
}

impl DispatchError {
    /// Wrap any error signalled by user code.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }
}

impl fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MethodNotFound { controller, ref method } => f
                .debug_struct("MethodNotFound")
                .field("controller", &controller)
                .field("method", method)
                .finish(),
            Self::ArgumentMismatch {
                ref method,
                expected,
                found,
            } => f
                .debug_struct("ArgumentMismatch")
                .field("method", method)
                .field("expected", &expected)
                .field("found", &found)
                .finish(),
            Self::ArgumentType { ref method, position } => f
                .debug_struct("ArgumentType")
                .field("method", method)
                .field("position", &position)
                .finish(),
            Self::Handler(ref e) => f.debug_tuple("Handler").field(e).finish(),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MethodNotFound { controller, ref method } => {
                write!(f, "method {method} not found on controller {controller}")
            }
            Self::ArgumentMismatch {
                ref method,
                expected,
                found,
            } => write!(f, "method {method} takes {expected} argument(s) but {found} were given"),
            Self::ArgumentType { ref method, position } => {
                write!(f, "argument {position} of method {method} has mismatched type")
            }
            Self::Handler(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::Handler(ref e) => Some(&**e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use super::*;

    #[test]
    fn display() {
        let err = DispatchError::MethodNotFound {
            controller: "Demo",
            method: "Missing".into(),
        };
        assert_eq!(err.to_string(), "method Missing not found on controller Demo");

        let err = DispatchError::ArgumentMismatch {
            method: "Hello".into(),
            expected: 0,
            found: 2,
        };
        assert_eq!(err.to_string(), "method Hello takes 0 argument(s) but 2 were given");

        let err = DispatchError::ArgumentType {
            method: "PreCall__".into(),
            position: 0,
        };
        assert_eq!(err.to_string(), "argument 0 of method PreCall__ has mismatched type");
    }

    #[test]
    fn handler_source() {
        let err = DispatchError::handler("boom");
        assert_eq!(err.to_string(), "boom");
        assert!(err.source().is_some());
        assert!(format!("{err:?}").starts_with("Handler"));
    }
}
