//! Binding of [Controller] methods to routes.
//!
//! [Router::controller] routes every method in a controller's dispatch table whose name does not
//! end with `__` to `prefix/lowercased_name` under each verb in [VERBS]. [Router::controller_method]
//! binds one method to an explicit path.
//!
//! A bound route runs, in order:
//!
//! 1. `PreCall__` when the controller has it. It receives the request context as its only argument,
//!    or nothing when it takes no arguments. A failing `PreCall__` ends the call.
//! 2. The bound method, with no arguments.
//! 3. `PostCall__` when the controller has it, with no arguments. It runs even when the bound
//!    method failed, in which case the method's error is the one returned.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use switchyard_web::{
//!     dispatch::{Controller, DispatchTable},
//!     dispatch_table,
//!     http::{Method, StatusCode},
//!     Router,
//! };
//!
//! #[derive(Default)]
//! struct Demo {
//!     calls: Mutex<Vec<&'static str>>,
//! }
//!
//! impl Demo {
//!     fn hello(&self) {
//!         self.calls.lock().unwrap().push("hello");
//!     }
//! }
//!
//! impl Controller for Demo {
//!     fn dispatch_table() -> DispatchTable<Self> {
//!         dispatch_table!(Self { "Hello" => Self::hello })
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let demo = Arc::new(Demo::default());
//!
//! let mut router = Router::<()>::new();
//! router.controller("/demo", demo.clone())?;
//!
//! assert_eq!(router.serve(&Method::PATCH, "/demo/hello", &mut ())?, StatusCode::OK);
//! assert_eq!(*demo.calls.lock().unwrap(), ["hello"]);
//! # Ok(())
//! # }
//! ```

use core::fmt;

use std::sync::Arc;

use http::Method;
use switchyard_router::{InsertError, Params};
use tracing::{debug, trace, warn};

use crate::{
    dispatch::{Args, Bound, Controller, ResolvedMethod},
    error::DispatchError,
    handler::Handler,
    router::Router,
};

const TARGET: &str = "switchyard_web::controller";

/// Name of the hook called before a bound method.
pub const PRE_CALL: &str = "PreCall__";

/// Name of the hook called after a bound method.
pub const POST_CALL: &str = "PostCall__";

/// Suffix marking a method as excluded from [Router::controller].
pub const RESERVED_SUFFIX: &str = "__";

/// Verbs a controller method is bound to.
pub const VERBS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

struct ControllerHandler<T> {
    bound: Bound<T>,
    name: Box<str>,
    method: Option<ResolvedMethod<T>>,
    pre_call: Option<ResolvedMethod<T>>,
    post_call: Option<ResolvedMethod<T>>,
}

impl<T: Controller> ControllerHandler<T> {
    fn new(bound: Bound<T>, name: &str) -> Self {
        let table = bound.table();

        let method = table.resolve(name);
        if method.is_none() {
            warn!(
                target: TARGET,
                controller = table.controller(),
                method = name,
                "controller method not found. calls to its routes will fail"
            );
        }

        Self {
            method,
            pre_call: table.resolve(PRE_CALL),
            post_call: table.resolve(POST_CALL),
            name: name.into(),
            bound,
        }
    }
}

impl<T, C> Handler<C> for ControllerHandler<T>
where
    T: Controller,
    C: 'static,
{
    fn call(&self, ctx: &mut C, _: &Params<'_, '_>) -> Result<(), DispatchError> {
        let this = &**self.bound.instance();

        if let Some(ref pre_call) = self.pre_call {
            trace!(target: TARGET, method = &*self.name, "calling {PRE_CALL}");
            let mut args = Args::new();
            if pre_call.arity() > 0 {
                args.push(ctx);
            }
            pre_call.call(this, &mut args)?;
        }

        let res = match self.method {
            Some(ref method) => method.call(this, &mut Args::new()).map(drop),
            None => Err(self.bound.table().not_found(&self.name)),
        };

        if let Some(ref post_call) = self.post_call {
            trace!(target: TARGET, method = &*self.name, "calling {POST_CALL}");
            let post = post_call.call(this, &mut Args::new()).map(drop);
            return res.and(post);
        }

        res
    }
}

impl<T> fmt::Debug for ControllerHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerHandler")
            .field("controller", &self.bound.table().controller())
            .field("method", &self.name)
            .field("pre_call", &self.pre_call.is_some())
            .field("post_call", &self.post_call.is_some())
            .finish()
    }
}

impl<C: 'static> Router<C> {
    /// Route every method of `instance` not ending with `__` to `prefix/lowercased_name` under
    /// each verb in [VERBS].
    ///
    /// Registration is all or nothing. On the first conflicting route every route this call
    /// inserted is removed again and the error is returned.
    pub fn controller<T: Controller>(&mut self, prefix: &str, instance: Arc<T>) -> Result<(), InsertError> {
        let bound = Bound::new(instance);
        let prefix = prefix.trim_end_matches('/');

        let names = bound
            .table()
            .names()
            .filter(|name| !name.ends_with(RESERVED_SUFFIX))
            .collect::<Vec<_>>();

        self.register_all(|router| {
            for name in names {
                let path = format!("{prefix}/{}", name.to_lowercase());
                debug!(
                    target: TARGET,
                    controller = bound.table().controller(),
                    method = name,
                    path = %path,
                    "binding controller method"
                );
                router.bind(&VERBS, &path, ControllerHandler::new(bound.clone(), name))?;
            }
            Ok(())
        })
    }

    /// Route the method `name` of `instance` to `path` under each verb in [VERBS].
    ///
    /// `path` is used as is and names ending with `__` are allowed, which makes this the way to
    /// expose an entry point such as an index method at `/`.
    pub fn controller_method<T: Controller>(
        &mut self,
        path: &str,
        instance: Arc<T>,
        name: &str,
    ) -> Result<(), InsertError> {
        self.controller_method_inner(&VERBS, path, instance, name)
    }

    /// Same as [Router::controller_method] for the single verb `method`.
    pub fn controller_method_for<T: Controller>(
        &mut self,
        method: Method,
        path: &str,
        instance: Arc<T>,
        name: &str,
    ) -> Result<(), InsertError> {
        self.controller_method_inner(&[method], path, instance, name)
    }

    fn controller_method_inner<T: Controller>(
        &mut self,
        verbs: &[Method],
        path: &str,
        instance: Arc<T>,
        name: &str,
    ) -> Result<(), InsertError> {
        let handler = ControllerHandler::new(Bound::new(instance), name);
        debug!(
            target: TARGET,
            controller = handler.bound.table().controller(),
            method = name,
            path,
            "binding controller method"
        );
        self.register_all(|router| router.bind(verbs, path, handler))
    }

    fn bind<T: Controller>(
        &mut self,
        verbs: &[Method],
        path: &str,
        handler: ControllerHandler<T>,
    ) -> Result<(), InsertError> {
        let handler = Arc::new(handler);
        verbs
            .iter()
            .try_for_each(|verb| self.handle_boxed(verb.clone(), path, handler.clone()))
    }
}
