//! A compressed radix tree URL router with named parameters and catch-all segments.
//!
//!```rust
//!use switchyard_router::Router;
//!
//!fn main() -> Result<(), Box<dyn std::error::Error>> {
//!    let mut router = Router::new();
//!    router.insert("/home", "Welcome!")?;
//!    router.insert("/users/:id", "A User")?;
//!
//!    let matched = router.at("/users/978")?;
//!    assert_eq!(matched.params.get("id"), Some("978"));
//!    assert_eq!(*matched.value, "A User");
//!
//!    Ok(())
//!}
//!```
//!
//!# Parameters
//!
//!Named parameters like `/:id` match a single, non-empty path segment, i.e. anything up to the
//!next `/` or the end of the path.
//!
//!```rust
//!# use switchyard_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("/users/:id", 42)?;
//!
//!let matched = router.at("/users/1")?;
//!assert_eq!(matched.params.get("id"), Some("1"));
//!
//!assert!(router.at("/users/").is_err());
//!assert!(router.at("/users/1/posts").is_err());
//!# Ok(())
//!# }
//!```
//!
//!A parameter may follow static text inside a segment.
//!
//!```rust
//!# use switchyard_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("/user_:name", true)?;
//!
//!let matched = router.at("/user_gordon")?;
//!assert_eq!(matched.params.get("name"), Some("gordon"));
//!# Ok(())
//!# }
//!```
//!
//!Catch-all parameters like `/*path` match the rest of the path. The captured value never
//!includes the leading `/` and must not be empty. They must always be at the *end* of the route.
//!
//!```rust
//!# use switchyard_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("/src/*filepath", true)?;
//!
//!let matched = router.at("/src/css/main.css")?;
//!assert_eq!(matched.params.get("filepath"), Some("css/main.css"));
//!
//!assert!(router.at("/src/").is_err());
//!# Ok(())
//!# }
//!```
//!
//!# Priority
//!
//!Static, parameter and catch-all children may share a parent. At every branch point static text
//!is tried first, then the parameter and finally the catch-all. If a branch dead-ends the next one
//!is tried.
//!
//!```rust
//!# use switchyard_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("/user/list", "list")?;
//!router.insert("/user/:id", "user")?;
//!router.insert("/user/*rest", "rest")?;
//!
//!assert_eq!(*router.at("/user/list")?.value, "list");
//!assert_eq!(*router.at("/user/42")?.value, "user");
//!assert_eq!(*router.at("/user/42/posts")?.value, "rest");
//!# Ok(())
//!# }
//!```
//!
//!# Conflict Rules
//!
//!Inserting a route fails with [InsertError::Conflict] when it is already registered or when a
//!parameter or catch-all at the same position uses a different name. A failed insert leaves the
//!router unchanged.
//!
//!```rust
//!# use switchyard_router::{InsertError, Router};
//!let mut router = Router::new();
//!router.insert("/user/:id", ()).unwrap();
//!
//!assert_eq!(
//!    router.insert("/user/:name", ()),
//!    Err(InsertError::Conflict { with: "/user/:id".into() })
//!);
//!```

#![forbid(unsafe_code)]

mod error;
mod path;
mod router;
mod tree;

pub mod params;
pub mod pattern;

pub use error::{InsertError, MatchError};
pub use params::Params;
pub use path::clean_path;
pub use router::{Match, Router};
