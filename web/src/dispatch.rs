//! Name based method dispatch.
//!
//! A [Controller] lists its callable methods in a [DispatchTable]. A method is any function
//! taking `&self` followed by up to three `&mut` arguments and returning `()` or a `Result`.
//! Calls pass arguments as `&mut dyn Any` through [Args] and receive type-erased [Results].
//!
//! ```rust
//! use switchyard_web::{
//!     dispatch::{invoke, Args, Controller, DispatchTable, Target},
//!     dispatch_table,
//!     error::BoxError,
//! };
//!
//! struct Greeter;
//!
//! impl Greeter {
//!     fn greet(&self, name: &mut String) -> Result<String, BoxError> {
//!         Ok(format!("hello {name}"))
//!     }
//! }
//!
//! impl Controller for Greeter {
//!     fn dispatch_table() -> DispatchTable<Self> {
//!         dispatch_table!(Self { "Greet" => Self::greet })
//!     }
//! }
//!
//! let mut name = String::from("ferris");
//! let mut results = invoke(Target::Instance(&Greeter), "Greet", &mut Args::new().with(&mut name)).unwrap();
//! assert_eq!(results.take::<String>(0).as_deref(), Some("hello ferris"));
//! ```

use core::{any::Any, fmt, marker::PhantomData};

use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use crate::error::{BoxError, DispatchError};

/// Arguments of a dynamic call, in positional order.
#[derive(Default)]
pub struct Args<'a> {
    inner: Vec<&'a mut (dyn Any + 'static)>,
}

impl<'a> Args<'a> {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Append an argument.
    pub fn with(mut self, arg: &'a mut (dyn Any + 'static)) -> Self {
        self.push(arg);
        self
    }

    pub fn push(&mut self, arg: &'a mut (dyn Any + 'static)) {
        self.inner.push(arg);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

/// Return values of a dynamic call.
#[derive(Default)]
pub struct Results {
    values: Vec<Box<dyn Any + Send>>,
}

impl Results {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    fn one(value: Box<dyn Any + Send>) -> Self {
        Self { values: vec![value] }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the value at `idx` if it is a `T`.
    pub fn get<T: Any>(&self, idx: usize) -> Option<&T> {
        self.values.get(idx)?.downcast_ref()
    }

    /// Move the value at `idx` out if it is a `T`. Later values keep their position.
    pub fn take<T: Any>(&mut self, idx: usize) -> Option<T> {
        let slot = self.values.get_mut(idx)?;
        if !slot.is::<T>() {
            return None;
        }
        let value = core::mem::replace(slot, Box::new(()));
        value.downcast().ok().map(|value| *value)
    }
}

impl fmt::Debug for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Results").field("len", &self.len()).finish()
    }
}

/// Conversion of a method's return value into [Results].
///
/// `Err` values become [DispatchError::Handler].
pub trait IntoResults {
    fn into_results(self) -> Result<Results, DispatchError>;
}

impl IntoResults for () {
    fn into_results(self) -> Result<Results, DispatchError> {
        Ok(Results::new())
    }
}

impl<T, E> IntoResults for Result<T, E>
where
    T: Any + Send,
    E: Into<BoxError>,
{
    fn into_results(self) -> Result<Results, DispatchError> {
        match self {
            Ok(value) => Ok(Results::one(Box::new(value))),
            Err(e) => Err(DispatchError::Handler(e.into())),
        }
    }
}

/// A function callable by name on a `T`.
///
/// Implemented for `Fn(&T, &mut A1, .., &mut An) -> R` with up to three arguments where `R` is
/// [IntoResults]. `Marker` only tells the implementations apart.
pub trait Method<T, Marker>: Send + Sync + 'static {
    /// Number of arguments after `&self`.
    const ARITY: usize;

    fn invoke(&self, this: &T, name: &str, args: &mut Args<'_>) -> Result<Results, DispatchError>;
}

fn downcast<'a, A: Any>(arg: &'a mut (dyn Any + 'static), method: &str, position: usize) -> Result<&'a mut A, DispatchError> {
    arg.downcast_mut().ok_or_else(|| DispatchError::ArgumentType {
        method: method.into(),
        position,
    })
}

macro_rules! method_impl {
    ($arity: literal; $($pos: literal $ty: ident $arg: ident),*) => {
        impl<T, F, R, $($ty,)*> Method<T, fn(&T $(, &mut $ty)*) -> R> for F
        where
            F: Fn(&T $(, &mut $ty)*) -> R + Send + Sync + 'static,
            R: IntoResults,
            $($ty: Any,)*
        {
            const ARITY: usize = $arity;

            fn invoke(&self, this: &T, name: &str, args: &mut Args<'_>) -> Result<Results, DispatchError> {
                let found = args.len();
                match args.inner.as_mut_slice() {
                    [$($arg),*] => {
                        $(let $arg = downcast::<$ty>(&mut **$arg, name, $pos)?;)*
                        (self)(this $(, $arg)*).into_results()
                    }
                    _ => Err(DispatchError::ArgumentMismatch {
                        method: name.into(),
                        expected: $arity,
                        found,
                    }),
                }
            }
        }
    };
}

method_impl!(0;);
method_impl!(1; 0 A1 a1);
method_impl!(2; 0 A1 a1, 1 A2 a2);
method_impl!(3; 0 A1 a1, 1 A2 a2, 2 A3 a3);

// Object safe view of a Method with its marker erased.
trait ErasedMethod<T>: Send + Sync {
    fn arity(&self) -> usize;

    fn invoke(&self, this: &T, name: &str, args: &mut Args<'_>) -> Result<Results, DispatchError>;
}

struct Erased<F, M> {
    func: F,
    _marker: PhantomData<fn() -> M>,
}

impl<T, F, M> ErasedMethod<T> for Erased<F, M>
where
    F: Method<T, M>,
{
    fn arity(&self) -> usize {
        F::ARITY
    }

    #[inline]
    fn invoke(&self, this: &T, name: &str, args: &mut Args<'_>) -> Result<Results, DispatchError> {
        self.func.invoke(this, name, args)
    }
}

/// A method resolved from a [DispatchTable]. Calling it skips the name lookup.
pub struct ResolvedMethod<T> {
    name: &'static str,
    method: Arc<dyn ErasedMethod<T>>,
}

impl<T> Clone for ResolvedMethod<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            method: self.method.clone(),
        }
    }
}

impl<T> ResolvedMethod<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of arguments the method takes after `&self`.
    pub fn arity(&self) -> usize {
        self.method.arity()
    }

    #[inline]
    pub fn call(&self, this: &T, args: &mut Args<'_>) -> Result<Results, DispatchError> {
        self.method.invoke(this, self.name, args)
    }
}

impl<T> fmt::Debug for ResolvedMethod<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedMethod")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Method name to function mapping of a controller type.
///
/// Names keep their insertion order. Adding a name twice replaces the earlier function.
pub struct DispatchTable<T> {
    controller: &'static str,
    methods: Vec<ResolvedMethod<T>>,
}

impl<T: 'static> Default for DispatchTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> DispatchTable<T> {
    pub fn new() -> Self {
        Self {
            controller: type_name::<T>(),
            methods: Vec::new(),
        }
    }

    /// Add a method under `name`.
    pub fn method<F, M>(mut self, name: &'static str, func: F) -> Self
    where
        F: Method<T, M>,
        M: 'static,
    {
        let method = ResolvedMethod {
            name,
            method: Arc::new(Erased {
                func,
                _marker: PhantomData,
            }),
        };

        match self.methods.iter_mut().find(|m| m.name == name) {
            Some(slot) => *slot = method,
            None => self.methods.push(method),
        }

        self
    }
}

impl<T> DispatchTable<T> {
    /// Type name of the controller the table belongs to.
    pub fn controller(&self) -> &'static str {
        self.controller
    }

    /// Method names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.iter().map(|m| m.name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    pub fn resolve(&self, name: &str) -> Option<ResolvedMethod<T>> {
        self.methods.iter().find(|m| m.name == name).cloned()
    }

    /// Resolve `name` and call it.
    pub fn call(&self, this: &T, name: &str, args: &mut Args<'_>) -> Result<Results, DispatchError> {
        match self.methods.iter().find(|m| m.name == name) {
            Some(method) => method.call(this, args),
            None => Err(self.not_found(name)),
        }
    }

    pub(crate) fn not_found(&self, name: &str) -> DispatchError {
        DispatchError::MethodNotFound {
            controller: self.controller,
            method: name.into(),
        }
    }
}

impl<T> fmt::Debug for DispatchTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("controller", &self.controller)
            .field("methods", &self.methods)
            .finish()
    }
}

/// A type whose methods can be called by name.
///
/// Usually implemented with [dispatch_table!](crate::dispatch_table).
pub trait Controller: Send + Sync + Sized + 'static {
    fn dispatch_table() -> DispatchTable<Self>;
}

static TABLES: OnceLock<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> = OnceLock::new();

/// The dispatch table of `T`, built on first use and shared afterwards.
pub fn dispatch_table<T: Controller>() -> Arc<DispatchTable<T>> {
    let tables = TABLES.get_or_init(Default::default);
    let id = TypeId::of::<T>();

    let cached = tables
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .cloned();

    if let Some(table) = cached.and_then(|table| table.downcast().ok()) {
        return table;
    }

    let table = Arc::new(T::dispatch_table());

    // another thread may have raced us here. keep whichever got in first.
    let entry = tables
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert_with(|| table.clone() as Arc<dyn Any + Send + Sync>)
        .clone();

    entry.downcast().unwrap_or(table)
}

/// A controller instance paired with its dispatch table.
pub struct Bound<T> {
    instance: Arc<T>,
    table: Arc<DispatchTable<T>>,
}

impl<T> Clone for Bound<T> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
            table: self.table.clone(),
        }
    }
}

impl<T: Controller> Bound<T> {
    pub fn new(instance: Arc<T>) -> Self {
        Self {
            instance,
            table: dispatch_table::<T>(),
        }
    }
}

impl<T> Bound<T> {
    pub fn instance(&self) -> &Arc<T> {
        &self.instance
    }

    pub fn table(&self) -> &DispatchTable<T> {
        &self.table
    }
}

/// Receiver of [invoke].
pub enum Target<'a, T> {
    /// A plain instance. Its table is fetched from the process wide cache.
    Instance(&'a T),
    /// An instance with its table already at hand.
    Bound(&'a Bound<T>),
}

/// Call the method named `name` on `target`.
pub fn invoke<T: Controller>(target: Target<'_, T>, name: &str, args: &mut Args<'_>) -> Result<Results, DispatchError> {
    match target {
        Target::Instance(this) => dispatch_table::<T>().call(this, name, args),
        Target::Bound(bound) => bound.table.call(&bound.instance, name, args),
    }
}

/// Build a [DispatchTable] from `"Name" => function` pairs.
///
/// ```rust
/// # use switchyard_web::{dispatch::DispatchTable, dispatch_table};
/// struct Demo;
///
/// impl Demo {
///     fn hello(&self) {}
/// }
///
/// let table: DispatchTable<Demo> = dispatch_table!(Demo { "Hello" => Demo::hello });
/// assert!(table.contains("Hello"));
/// ```
#[macro_export]
macro_rules! dispatch_table {
    ($ty: ty { $($name: literal => $func: expr),* $(,)? }) => {
        $crate::dispatch::DispatchTable::<$ty>::new()$(.method($name, $func))*
    };
}
