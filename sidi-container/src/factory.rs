//! Factories: named recipes for building new instances.
//!
//! A [`Factory`] turns an [`Args`] list into a fresh [`Instance`]. Two
//! adapters cover the common cases:
//! - [`FnFactory`] wraps a closure `Fn(Args) -> Result<T>`
//! - [`Constructor`] wraps a type implementing [`Construct`]
//!
//! Custom adapter types can implement [`Factory`] directly.

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use crate::args::Args;
use crate::error::Result;

/// A freshly constructed, type-erased instance.
///
/// Recover the concrete type with [`Box::downcast`] or check it with
/// `instance.is::<T>()`.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Builds new instances from positional construction arguments.
///
/// Factories are shared between the container and any handle cloned out
/// of a [`SharedContainer`](crate::shared::SharedContainer), hence
/// `Send + Sync`.
pub trait Factory: Send + Sync {
    /// Builds a new instance. Every call must return a new value.
    fn construct(&self, args: Args) -> Result<Instance>;

    /// Type name of the instances this factory produces.
    fn produces(&self) -> &'static str {
        "<unknown>"
    }
}

/// A type that knows how to build itself from construction arguments.
///
/// Registering such a type with
/// [`Container::register_type`](crate::container::Container::register_type)
/// makes every created instance a genuine `Self`.
///
/// # Examples
/// ```
/// use sidi_container::prelude::*;
///
/// struct Widget {
///     color: String,
///     size: u32,
/// }
///
/// impl Construct for Widget {
///     fn construct(args: &mut Args) -> Result<Self> {
///         Ok(Widget {
///             color: args.take::<&str>(0)?.to_string(),
///             size: *args.arg::<u32>(1)?,
///         })
///     }
/// }
///
/// let widget = Widget::construct(&mut args!["red", 5u32]).unwrap();
/// assert_eq!(widget.color, "red");
/// assert_eq!(widget.size, 5);
/// ```
pub trait Construct: Sized + Send + Sync + 'static {
    fn construct(args: &mut Args) -> Result<Self>;
}

/// Adapts a closure into a [`Factory`].
pub struct FnFactory<F, T> {
    f: F,
    _produces: PhantomData<fn() -> T>,
}

impl<F, T> FnFactory<F, T>
where
    F: Fn(Args) -> Result<T> + Send + Sync,
    T: Any + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _produces: PhantomData,
        }
    }
}

impl<F, T> Factory for FnFactory<F, T>
where
    F: Fn(Args) -> Result<T> + Send + Sync,
    T: Any + Send + Sync,
{
    fn construct(&self, args: Args) -> Result<Instance> {
        Ok(Box::new((self.f)(args)?))
    }

    fn produces(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Adapts a [`Construct`] type into a [`Factory`].
pub struct Constructor<T> {
    _produces: PhantomData<fn() -> T>,
}

impl<T: Construct> Constructor<T> {
    pub fn new() -> Self {
        Self {
            _produces: PhantomData,
        }
    }
}

impl<T: Construct> Default for Constructor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Construct> Factory for Constructor<T> {
    fn construct(&self, mut args: Args) -> Result<Instance> {
        Ok(Box::new(T::construct(&mut args)?))
    }

    fn produces(&self) -> &'static str {
        type_name::<T>()
    }
}

impl fmt::Debug for dyn Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("produces", &self.produces())
            .finish()
    }
}
