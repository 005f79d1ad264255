//! A cloneable, lock-guarded handle to a [`Container`].
//!
//! [`Container`] itself assumes a single owner mutating it. When several
//! threads need the same registry, wrap it in a [`SharedContainer`]: one
//! `RwLock` guards both namespaces, and every clone of the handle sees
//! the same entries.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use crate::args::Args;
use crate::container::{Container, Value, downcast_instance};
use crate::error::Result;
use crate::factory::{Construct, Factory, Instance};
use crate::provider::Provider;

/// Thread-safe handle to a shared [`Container`].
///
/// Methods mirror [`Container`] but take `&self` and chain on `&Self`.
/// Factories run after the lock is released, so a factory may itself
/// read from or write to the same shared container.
///
/// # Examples
/// ```rust
/// use sidi_container::prelude::*;
/// use std::thread;
///
/// let shared = SharedContainer::new();
/// shared.set("greeting", String::from("hello"));
///
/// let handle = shared.clone();
/// thread::spawn(move || {
///     handle.set("answer", 42u32);
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(*shared.get::<u32>("answer").unwrap(), 42);
/// ```
#[derive(Clone, Default)]
pub struct SharedContainer {
    inner: Arc<RwLock<Container>>,
}

impl SharedContainer {
    /// Creates a handle to a new, empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the container for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, Container> {
        self.inner.read()
    }

    /// Locks the container for writing, e.g. to apply several
    /// registrations atomically.
    pub fn write(&self) -> RwLockWriteGuard<'_, Container> {
        self.inner.write()
    }

    // ── Values ──

    pub fn set<T: Any + Send + Sync>(&self, name: impl Into<String>, value: T) -> &Self {
        self.write().set(name, value);
        self
    }

    pub fn set_shared<T: Any + Send + Sync>(&self, name: impl Into<String>, value: Arc<T>) -> &Self {
        self.write().set_shared(name, value);
        self
    }

    pub fn set_if_present<T: Any + Send + Sync>(
        &self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> &Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.read().get(name)
    }

    pub fn try_get<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
        self.read().try_get(name)
    }

    pub fn get_any(&self, name: &str) -> Option<Value> {
        self.read().get_any(name)
    }

    pub fn clear(&self, name: &str) -> &Self {
        self.write().clear(name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    // ── Factories ──

    pub fn set_factory<F, T>(&self, name: impl Into<String>, factory: F) -> &Self
    where
        F: Fn(Args) -> Result<T> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        self.write().set_factory(name, factory);
        self
    }

    pub fn set_factory_if_present<F, T>(&self, name: impl Into<String>, factory: Option<F>) -> &Self
    where
        F: Fn(Args) -> Result<T> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        self.write().set_factory_if_present(name, factory);
        self
    }

    pub fn register_factory(&self, name: impl Into<String>, factory: impl Factory + 'static) -> &Self {
        self.write().register_factory(name, factory);
        self
    }

    pub fn register_type<T: Construct>(&self, name: impl Into<String>) -> &Self {
        self.write().register_type::<T>(name);
        self
    }

    /// Builds a new instance; see [`Container::create`].
    pub fn create(&self, name: &str, args: Args) -> Result<Option<Instance>> {
        let Some(factory) = self.read().factory(name) else {
            return Ok(None);
        };
        trace!(name, produces = factory.produces(), "Constructing outside the lock");
        factory.construct(args).map(Some)
    }

    /// Builds a new instance as `T`; see [`Container::create_as`].
    pub fn create_as<T: Any>(&self, name: &str, args: Args) -> Result<Option<T>> {
        let Some(factory) = self.read().factory(name) else {
            return Ok(None);
        };
        let instance = factory.construct(args)?;
        downcast_instance(name, factory.as_ref(), instance).map(Some)
    }

    pub fn clear_factory(&self, name: &str) -> &Self {
        self.write().clear_factory(name);
        self
    }

    pub fn has_factory(&self, name: &str) -> bool {
        self.read().has_factory(name)
    }

    pub fn add_provider(&self, provider: &dyn Provider) -> &Self {
        self.write().add_provider(provider);
        self
    }
}

impl From<Container> for SharedContainer {
    fn from(container: Container) -> Self {
        Self {
            inner: Arc::new(RwLock::new(container)),
        }
    }
}

impl fmt::Debug for SharedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedContainer").field(&*self.read()).finish()
    }
}
