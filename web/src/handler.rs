//! Request handlers stored in the router.

use std::sync::Arc;

use switchyard_router::Params;

use crate::error::DispatchError;

/// A routed request handler.
///
/// `C` is the request context the serving layer owns. The router never inspects it and hands it
/// to the handler by mutable reference together with the matched path parameters.
///
/// Closures of the shape `Fn(&mut C, &Params) -> Result<(), DispatchError>` are handlers.
pub trait Handler<C>: Send + Sync + 'static {
    fn call(&self, ctx: &mut C, params: &Params<'_, '_>) -> Result<(), DispatchError>;
}

impl<C, F> Handler<C> for F
where
    F: Fn(&mut C, &Params<'_, '_>) -> Result<(), DispatchError> + Send + Sync + 'static,
{
    #[inline]
    fn call(&self, ctx: &mut C, params: &Params<'_, '_>) -> Result<(), DispatchError> {
        (self)(ctx, params)
    }
}

/// Type-erased [Handler]. Shared between every method a controller route is bound to.
pub type BoxedHandler<C> = Arc<dyn Handler<C>>;
