use core::fmt;

use std::sync::Arc;

use http::{Method, StatusCode, Uri};
use switchyard_router::{InsertError, Params};
use tracing::{debug, trace, warn};

use crate::{
    config::RouterConfig,
    error::DispatchError,
    handler::BoxedHandler,
    methods::MethodTrieSet,
};

const TARGET: &str = "switchyard_web::router";

macro_rules! method {
    ($method_fn: ident, $method: ident) => {
        #[doc = concat!("Register a handler for `", stringify!($method), "` requests to `path`.")]
        pub fn $method_fn<F>(&mut self, path: &str, handler: F) -> Result<(), InsertError>
        where
            F: Fn(&mut C, &Params<'_, '_>) -> Result<(), DispatchError> + Send + Sync + 'static,
        {
            self.handle(Method::$method, path, handler)
        }
    };
}

/// HTTP method aware router.
///
/// Keeps one route tree per method. Routes are registered through `&mut self` before serving
/// starts, after which the router is shared immutably between any number of workers.
///
/// `C` is the request context handed to handlers. See [Handler].
///
/// # Examples
///
/// ```rust
/// use switchyard_web::{http::Method, Lookup, Router};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::<Vec<String>>::new();
/// router.get("/user/:id", |ctx, params| {
///     ctx.extend(params.get("id").map(String::from));
///     Ok(())
/// })?;
///
/// let mut ctx = Vec::new();
/// router.serve(&Method::GET, "/user/42", &mut ctx)?;
/// assert_eq!(ctx, ["42"]);
///
/// assert!(matches!(router.lookup(&Method::POST, "/user/42"), Lookup::MethodNotAllowed(_)));
/// # Ok(())
/// # }
/// ```
pub struct Router<C> {
    trees: MethodTrieSet<BoxedHandler<C>>,
    config: RouterConfig,
}

impl<C: 'static> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Router<C> {
    /// Construct a router with every [RouterConfig] switch on.
    pub const fn new() -> Self {
        Self::with_config(RouterConfig::new())
    }

    pub const fn with_config(config: RouterConfig) -> Self {
        Self {
            trees: MethodTrieSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a handler for the given method and path.
    ///
    /// See [switchyard_router] for the pattern syntax and the conflict rules.
    pub fn handle<F>(&mut self, method: Method, path: &str, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&mut C, &Params<'_, '_>) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        self.handle_boxed(method, path, Arc::new(handler))
    }

    /// Register an already type-erased handler.
    ///
    /// The same [BoxedHandler] can be registered under multiple methods and paths.
    pub fn handle_boxed(&mut self, method: Method, path: &str, handler: BoxedHandler<C>) -> Result<(), InsertError> {
        match self.trees.get_or_insert(&method).insert(path, handler) {
            Ok(()) => {
                debug!(target: TARGET, %method, path, "route registered");
                Ok(())
            }
            Err(e) => {
                warn!(target: TARGET, %method, path, error = %e, "route registration failed");
                Err(e)
            }
        }
    }

    // Run `register` and restore every tree when it fails part way.
    pub(crate) fn register_all<F>(&mut self, register: F) -> Result<(), InsertError>
    where
        F: FnOnce(&mut Self) -> Result<(), InsertError>,
    {
        let snapshot = self.trees.clone();
        match register(self) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.trees = snapshot;
                Err(e)
            }
        }
    }

    method!(get, GET);
    method!(post, POST);
    method!(put, PUT);
    method!(patch, PATCH);
    method!(delete, DELETE);
    method!(options, OPTIONS);
    method!(head, HEAD);

    /// Resolve a request to a handler or to the response the server should produce instead.
    ///
    /// The exact path is tried first. When it does not match, and the method is not `CONNECT`
    /// and the path is not `/`, the trailing slash and fixed path redirects are tried in that
    /// order. Failing those, `OPTIONS` requests are answered with the allowed methods, other
    /// methods get `405` when the path is routed for other methods, and everything else is not
    /// found. Each step honors its [RouterConfig] switch.
    pub fn lookup<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Lookup<'r, 'p, C> {
        let lookup = self._lookup(method, path);
        if !matches!(lookup, Lookup::Matched { .. }) {
            trace!(target: TARGET, %method, path, ?lookup, "route not matched");
        }
        lookup
    }

    fn _lookup<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Lookup<'r, 'p, C> {
        let config = &self.config;

        if let Some(tree) = self.trees.get(method) {
            if let Ok(matched) = tree.at(path) {
                return Lookup::Matched {
                    handler: matched.value,
                    params: matched.params,
                };
            }

            if method != Method::CONNECT && path != "/" {
                if config.redirect_trailing_slash {
                    if let Some(location) = tree.trailing_slash_redirect(path) {
                        return Lookup::RedirectTrailingSlash(Redirect::new(method, location));
                    }
                }

                if config.redirect_fixed_path {
                    if let Some(location) = tree.fixed_path(path, config.redirect_trailing_slash) {
                        return Lookup::RedirectFixedPath(Redirect::new(method, location));
                    }
                }
            }
        }

        if method == Method::OPTIONS && config.handle_options {
            let allowed = self.allowed(path, method);
            if !allowed.is_empty() {
                return Lookup::Options(allowed);
            }
        } else if config.handle_method_not_allowed {
            let allowed = self.allowed(path, method);
            if !allowed.is_empty() {
                return Lookup::MethodNotAllowed(allowed);
            }
        }

        Lookup::NotFound
    }

    /// Same as [Router::lookup] but redirect locations keep the query string of `uri`.
    pub fn lookup_uri<'r, 'u>(&'r self, method: &Method, uri: &'u Uri) -> Lookup<'r, 'u, C> {
        let lookup = self.lookup(method, uri.path());
        match (lookup, uri.query()) {
            (Lookup::RedirectTrailingSlash(redirect), Some(query)) => {
                Lookup::RedirectTrailingSlash(redirect.with_query(query))
            }
            (Lookup::RedirectFixedPath(redirect), Some(query)) => Lookup::RedirectFixedPath(redirect.with_query(query)),
            (lookup, _) => lookup,
        }
    }

    /// Look up the request, call the matched handler and return the status the outcome maps to.
    ///
    /// Only a matched handler runs. Producing redirect, `Allow` and error responses for the other
    /// outcomes is left to the caller, which should use [Router::lookup] when it needs them.
    pub fn serve(&self, method: &Method, path: &str, ctx: &mut C) -> Result<StatusCode, DispatchError> {
        let lookup = self.lookup(method, path);
        if let Lookup::Matched { handler, ref params } = lookup {
            handler.call(ctx, params)?;
        }
        Ok(lookup.status())
    }

    /// Methods other than `method` that have a route matching `path`.
    ///
    /// For the server wide path `*` every method with at least one route is listed. A non empty
    /// list always contains `OPTIONS`. The list is sorted by method name without duplicates.
    pub fn allowed(&self, path: &str, method: &Method) -> Allowed {
        let mut methods = Vec::new();

        if path == "*" {
            for (m, tree) in self.trees.iter() {
                if *m != Method::OPTIONS && !tree.is_empty() {
                    methods.push(m.clone());
                }
            }
        } else {
            for (m, tree) in self.trees.iter() {
                if m == method || *m == Method::OPTIONS {
                    continue;
                }
                if tree.at(path).is_ok() {
                    methods.push(m.clone());
                }
            }
        }

        if !methods.is_empty() {
            methods.push(Method::OPTIONS);
        }

        methods.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
        methods.dedup();

        Allowed(methods)
    }

    /// Every registered method and route pattern.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.trees
            .iter()
            .flat_map(|(method, tree)| tree.routes().map(move |(route, _)| (method, route)))
    }
}

/// Outcome of [Router::lookup].
pub enum Lookup<'r, 'p, C> {
    /// A route matched. Call the handler with the parameters.
    Matched {
        handler: &'r BoxedHandler<C>,
        params: Params<'r, 'p>,
    },
    /// The path matches a route once a trailing slash is added or removed.
    RedirectTrailingSlash(Redirect),
    /// The cleaned, case corrected path matches a route.
    RedirectFixedPath(Redirect),
    /// The path is routed for other methods only.
    MethodNotAllowed(Allowed),
    /// Automatic answer to an `OPTIONS` request.
    Options(Allowed),
    NotFound,
}

impl<C> Lookup<'_, '_, C> {
    /// The response status this outcome maps to. A match maps to `200 OK`.
    pub fn status(&self) -> StatusCode {
        match *self {
            Self::Matched { .. } | Self::Options(_) => StatusCode::OK,
            Self::RedirectTrailingSlash(ref redirect) | Self::RedirectFixedPath(ref redirect) => redirect.status(),
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl<C> fmt::Debug for Lookup<'_, '_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Matched { ref params, .. } => f.debug_struct("Matched").field("params", params).finish(),
            Self::RedirectTrailingSlash(ref r) => f.debug_tuple("RedirectTrailingSlash").field(r).finish(),
            Self::RedirectFixedPath(ref r) => f.debug_tuple("RedirectFixedPath").field(r).finish(),
            Self::MethodNotAllowed(ref a) => f.debug_tuple("MethodNotAllowed").field(a).finish(),
            Self::Options(ref a) => f.debug_tuple("Options").field(a).finish(),
            Self::NotFound => f.write_str("NotFound"),
        }
    }
}

/// A permanent redirect to the path a route is registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    location: String,
    status: StatusCode,
}

impl Redirect {
    fn new(method: &Method, location: String) -> Self {
        // 308 keeps the method and body of non GET requests.
        let status = if method == Method::GET {
            StatusCode::MOVED_PERMANENTLY
        } else {
            StatusCode::PERMANENT_REDIRECT
        };

        Self { location, status }
    }

    fn with_query(mut self, query: &str) -> Self {
        self.location.push('?');
        self.location.push_str(query);
        self
    }

    /// Value for the `Location` header.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// `301 Moved Permanently` for `GET` and `308 Permanent Redirect` otherwise.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Sorted list of allowed methods.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allowed(Vec<Method>);

impl Allowed {
    pub fn methods(&self) -> &[Method] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.0.contains(method)
    }

    /// Value for the `Allow` header, e.g. `GET, OPTIONS, POST`.
    pub fn header_value(&self) -> String {
        let mut value = String::new();
        for (i, method) in self.0.iter().enumerate() {
            if i > 0 {
                value.push_str(", ");
            }
            value.push_str(method.as_str());
        }
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ok(_: &mut (), _: &Params<'_, '_>) -> Result<(), DispatchError> {
        Ok(())
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn router_is_send_sync() {
        assert_send_sync::<Router<()>>();
        assert_send_sync::<Router<Vec<String>>>();
        assert_send_sync::<Allowed>();
        assert_send_sync::<Redirect>();
    }

    #[test]
    fn concurrent_serve() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static HITS: AtomicUsize = AtomicUsize::new(0);

        let mut router = Router::<usize>::new();
        router
            .get("/hit/:n", |ctx, params| {
                *ctx += params.get("n").map_or(0, str::len);
                HITS.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
            .unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut ctx = 0;
                    for _ in 0..100 {
                        assert_eq!(router.serve(&Method::GET, "/hit/abc", &mut ctx).unwrap(), StatusCode::OK);
                    }
                    assert_eq!(ctx, 300);
                });
            }
        });

        assert_eq!(HITS.load(Ordering::Relaxed), 400);
    }

    #[test]
    fn allowed_is_sorted_and_unique() {
        let mut router = Router::<()>::new();
        for method in [Method::PUT, Method::GET, Method::DELETE, Method::OPTIONS] {
            router.handle(method, "/a", ok).unwrap();
        }

        let allowed = router.allowed("/a", &Method::PATCH);
        assert_eq!(
            allowed.methods(),
            [Method::DELETE, Method::GET, Method::OPTIONS, Method::PUT]
        );
        assert_eq!(allowed.header_value(), "DELETE, GET, OPTIONS, PUT");

        let allowed = router.allowed("/a", &Method::GET);
        assert!(!allowed.contains(&Method::GET));

        assert!(router.allowed("/b", &Method::GET).is_empty());
    }

    #[test]
    fn server_wide_options() {
        let mut router = Router::<()>::new();
        router.get("/a", ok).unwrap();
        router.post("/b", ok).unwrap();

        assert_eq!(
            router.allowed("*", &Method::OPTIONS).methods(),
            [Method::GET, Method::OPTIONS, Method::POST]
        );
    }

    #[test]
    fn redirect_status() {
        assert_eq!(
            Redirect::new(&Method::GET, "/a".into()).status(),
            StatusCode::MOVED_PERMANENTLY
        );
        assert_eq!(
            Redirect::new(&Method::POST, "/a".into()).status(),
            StatusCode::PERMANENT_REDIRECT
        );

        let redirect = Redirect::new(&Method::GET, "/a".into()).with_query("b=c");
        assert_eq!(redirect.location(), "/a?b=c");
    }
}
