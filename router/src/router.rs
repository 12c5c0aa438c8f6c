use super::{path::clean_path, tree::Node, InsertError, MatchError, Params};

/// A URL router.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone, Debug)]
pub struct Router<T> {
    root: Node<T>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Construct a new router.
    pub const fn new() -> Self {
        Self { root: Node::new() }
    }

    /// Insert a route.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use switchyard_router::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("/home", "Welcome!")?;
    /// router.insert("/users/:id", "A User")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, route: impl AsRef<str>, value: T) -> Result<(), InsertError> {
        self.root.insert(route.as_ref(), value)
    }

    /// Tries to find a value in the router matching the given path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use switchyard_router::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("/home", "Welcome!")?;
    ///
    /// let matched = router.at("/home").unwrap();
    /// assert_eq!(*matched.value, "Welcome!");
    /// # Ok(())
    /// # }
    /// ```
    pub fn at<'m, 'p>(&'m self, path: &'p str) -> Result<Match<'m, 'p, &'m T>, MatchError> {
        self.root
            .at(path)
            .map(|(value, params)| Match { value, params })
            .ok_or(MatchError)
    }

    /// Returns the path with a single trailing slash added or removed, if that path
    /// matches a route.
    ///
    /// ```rust
    /// # use switchyard_router::Router;
    /// let mut router = Router::new();
    /// router.insert("/a/b", ()).unwrap();
    /// router.insert("/c/", ()).unwrap();
    ///
    /// assert_eq!(router.trailing_slash_redirect("/a/b/").as_deref(), Some("/a/b"));
    /// assert_eq!(router.trailing_slash_redirect("/c").as_deref(), Some("/c/"));
    /// assert_eq!(router.trailing_slash_redirect("/a/b"), None);
    /// ```
    pub fn trailing_slash_redirect(&self, path: &str) -> Option<String> {
        // an exact match needs no redirect.
        if self.root.at(path).is_some() {
            return None;
        }

        let toggled = toggle_trailing_slash(path)?;
        let found = self.root.at(&toggled).is_some();
        found.then_some(toggled)
    }

    /// Returns the cleaned, case corrected path if it matches a route.
    ///
    /// The path is first cleaned with [clean_path](crate::clean_path) and then looked up ignoring
    /// ASCII case. When `trailing_slash` is true a path with a single trailing slash added or
    /// removed is tried as well. Static text in the result takes the casing of the registered
    /// route while parameter values are kept as they were in the given path.
    ///
    /// ```rust
    /// # use switchyard_router::Router;
    /// let mut router = Router::new();
    /// router.insert("/Users/:name", ()).unwrap();
    ///
    /// assert_eq!(router.fixed_path("/users/../users/Ada", false).as_deref(), Some("/Users/Ada"));
    /// assert_eq!(router.fixed_path("//USERS/Ada/", true).as_deref(), Some("/Users/Ada"));
    /// assert_eq!(router.fixed_path("/Users/Ada", false), None);
    /// ```
    pub fn fixed_path(&self, path: &str, trailing_slash: bool) -> Option<String> {
        let cleaned = clean_path(path);

        let fixed = self.root.find_case_insensitive(&cleaned).or_else(|| {
            if !trailing_slash {
                return None;
            }
            let toggled = toggle_trailing_slash(&cleaned)?;
            self.root.find_case_insensitive(&toggled)
        })?;

        (fixed != path).then_some(fixed)
    }

    /// Iterates over every registered route and its value.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &T)> {
        let mut routes = Vec::new();
        self.root.for_each(&mut |route, value| routes.push((route, value)));
        routes.into_iter()
    }

    /// Returns `true` if no route has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.priority == 0
    }
}

// Add a trailing slash, or remove it if there is one. The root path has no counterpart.
fn toggle_trailing_slash(path: &str) -> Option<String> {
    match path.strip_suffix('/') {
        Some("") => None,
        Some(stripped) => Some(String::from(stripped)),
        None => {
            let mut toggled = String::with_capacity(path.len() + 1);
            toggled.push_str(path);
            toggled.push('/');
            Some(toggled)
        }
    }
}

/// A successful match consisting of the registered value
/// and URL parameters, returned by [`Router::at`](Router::at).
#[derive(Debug)]
pub struct Match<'k, 'v, V> {
    /// The value stored under the matched node.
    pub value: V,
    /// The route parameters. See [parameters](crate#parameters) for more details.
    pub params: Params<'k, 'v>,
}
