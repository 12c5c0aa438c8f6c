//! HTTP method aware routing with controller dispatch, built on [switchyard_router].
//!
//! [Router] keeps one route tree per HTTP method and resolves a request to a [Lookup]. Besides
//! matched handlers, the lookup reports trailing slash and fixed path redirects, `405 Method Not
//! Allowed` with the allowed methods and automatic `OPTIONS` answers. Each of these can be
//! switched off with [RouterConfig].
//!
//! Handlers are plain closures receiving the request context and the path parameters. Types
//! implementing [Controller](dispatch::Controller) can have their methods routed by name with
//! [Router::controller]. See the [controller] module for the conventions.
//!
//! # Examples
//!
//! ```rust
//! use switchyard_web::{http::Method, Lookup, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::<()>::new();
//! router.get("/users/:id", |_, _| Ok(()))?;
//!
//! match router.lookup(&Method::GET, "/users/42/") {
//!     Lookup::RedirectTrailingSlash(redirect) => assert_eq!(redirect.location(), "/users/42"),
//!     _ => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod methods;
mod router;

pub mod controller;
pub mod dispatch;
pub mod error;
pub mod handler;

pub use self::config::RouterConfig;
pub use self::router::{Allowed, Lookup, Redirect, Router};

pub use switchyard_router::{clean_path, InsertError, Params};

pub use http;
