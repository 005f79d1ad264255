//! # The Container — heart of SiDI
//!
//! A registry of named values and named factories.
//!
//! # Architecture
//! ```text
//!                  Container
//!          ┌───────────┴───────────┐
//!     value store            factory store
//!   name → Arc<value>     name → Arc<dyn Factory>
//!   set / get / clear     set_factory / create / clear_factory
//! ```
//!
//! The two stores are independent namespaces. Unknown names never fail;
//! they read as `None`.
//!
//! # Examples
//! ```rust
//! use sidi_container::prelude::*;
//! use std::sync::Arc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Widget {
//!     color: String,
//!     size: u32,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .set("config", Config { url: "postgres://localhost".into() })
//!     .set_factory("widget", |mut args: Args| {
//!         Ok(Widget {
//!             color: args.take::<&str>(0)?.to_string(),
//!             size: args.take(1)?,
//!         })
//!     });
//!
//! let config: Arc<Config> = container.get("config").expect("config is set");
//! assert_eq!(config.url, "postgres://localhost");
//!
//! let widget: Widget = container
//!     .create_as("widget", args!["red", 5u32])
//!     .expect("construction succeeds")
//!     .expect("widget is registered");
//! assert_eq!(widget.color, "red");
//! assert_eq!(widget.size, 5);
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use sidi_support::rendering::{render_names, suggest_similar};
use tracing::{debug, instrument, trace};

use crate::args::Args;
use crate::error::{Result, SidiError};
use crate::factory::{Construct, Constructor, Factory, FnFactory, Instance};
use crate::provider::Provider;
use crate::registry::Registry;

/// A stored, shared value.
pub type Value = Arc<dyn Any + Send + Sync>;

const MAX_SUGGESTIONS: usize = 3;

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Named values and named factories.
///
/// Mutators take `&mut self` and return `&mut Self` so calls chain:
///
/// ```rust
/// use sidi_container::prelude::*;
///
/// let mut container = Container::new();
/// container.set("a", 1i32).set("b", 2i32).clear("a");
///
/// assert!(container.get::<i32>("a").is_none());
/// assert_eq!(*container.get::<i32>("b").unwrap(), 2);
/// ```
pub struct Container {
    values: Registry<Value>,
    factories: Registry<Arc<dyn Factory>>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            values: Registry::new("value"),
            factories: Registry::new("factory"),
        }
    }

    // ── Values ──

    /// Stores `value` under `name`, replacing any previous value.
    pub fn set<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.set_shared(name, Arc::new(value))
    }

    /// Stores an existing shared handle under `name`.
    ///
    /// [`get`](Container::get) hands back this very allocation, so the
    /// caller's handle and the stored one stay `Arc::ptr_eq`.
    pub fn set_shared<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        value: Arc<T>,
    ) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Stores `value` if there is one; `None` leaves `name` untouched.
    ///
    /// Lets optional parameters be forwarded without clearing an
    /// existing entry.
    ///
    /// ```rust
    /// use sidi_container::prelude::*;
    ///
    /// let mut container = Container::new();
    /// container.set("port", 8080u16).set_if_present("port", None::<u16>);
    /// assert_eq!(*container.get::<u16>("port").unwrap(), 8080);
    /// ```
    pub fn set_if_present<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> &mut Self {
        match value {
            Some(value) => self.set(name, value),
            None => {
                let name: String = name.into();
                trace!(name = %name, "No value given, leaving entry unchanged");
                self
            }
        }
    }

    /// Returns the value stored under `name`.
    ///
    /// `None` if the name was never set, was cleared, or holds a value
    /// of another type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get_any(name)?.downcast::<T>().ok()
    }

    /// Like [`get`](Container::get), but reports a type mismatch.
    pub fn try_get<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
        match self.get_any(name) {
            None => Ok(None),
            Some(value) => value
                .downcast::<T>()
                .map(Some)
                .map_err(|_| SidiError::ValueType {
                    name: name.to_string(),
                    expected: type_name::<T>(),
                }),
        }
    }

    /// Returns the stored value under `name` without a type check.
    pub fn get_any(&self, name: &str) -> Option<Value> {
        let value = self.values.get(name).cloned();
        if value.is_none() {
            trace_miss(name, &self.values);
        }
        value
    }

    /// Removes the value stored under `name`, if any.
    pub fn clear(&mut self, name: &str) -> &mut Self {
        self.values.remove(name);
        self
    }

    /// Returns `true` if a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains(name)
    }

    /// Names of all stored values, sorted.
    pub fn value_names(&self) -> Vec<String> {
        self.values.names()
    }

    // ── Factories ──

    /// Registers a closure factory under `name`, replacing any previous one.
    ///
    /// The closure receives the arguments passed to
    /// [`create`](Container::create) and must return a new instance on
    /// every call.
    pub fn set_factory<F, T>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(Args) -> Result<T> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        self.register_factory(name, FnFactory::new(factory))
    }

    /// Registers `factory` if there is one; `None` registers nothing.
    ///
    /// The rejection is silent, like setting an absent value.
    pub fn set_factory_if_present<F, T>(
        &mut self,
        name: impl Into<String>,
        factory: Option<F>,
    ) -> &mut Self
    where
        F: Fn(Args) -> Result<T> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        match factory {
            Some(factory) => self.set_factory(name, factory),
            None => {
                let name: String = name.into();
                debug!(name = %name, "No factory given, registration skipped");
                self
            }
        }
    }

    /// Registers any [`Factory`] implementation under `name`.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Factory + 'static,
    ) -> &mut Self {
        self.register_shared_factory(name, Arc::new(factory))
    }

    /// Registers an already shared factory under `name`.
    pub fn register_shared_factory(
        &mut self,
        name: impl Into<String>,
        factory: Arc<dyn Factory>,
    ) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Registers type `T` as the factory for `name`.
    ///
    /// Instances created from `name` are real `T` values built by
    /// [`Construct::construct`].
    pub fn register_type<T: Construct>(&mut self, name: impl Into<String>) -> &mut Self {
        self.register_factory(name, Constructor::<T>::new())
    }

    /// Builds a new instance from the factory registered under `name`.
    ///
    /// Returns `Ok(None)` if no factory is registered. Errors returned by
    /// the factory are passed through unchanged.
    #[instrument(level = "trace", skip(self, args), fields(arg_count = args.len()))]
    pub fn create(&self, name: &str, args: Args) -> Result<Option<Instance>> {
        let Some(factory) = self.factory(name) else {
            return Ok(None);
        };
        trace!(produces = factory.produces(), "Constructing");
        factory.construct(args).map(Some)
    }

    /// Builds a new instance and downcasts it to `T`.
    ///
    /// A factory producing some other type yields
    /// [`SidiError::InstanceType`].
    pub fn create_as<T: Any>(&self, name: &str, args: Args) -> Result<Option<T>> {
        let Some(factory) = self.factory(name) else {
            return Ok(None);
        };
        downcast_instance(name, factory.as_ref(), factory.construct(args)?).map(Some)
    }

    /// Removes the factory registered under `name`, if any.
    pub fn clear_factory(&mut self, name: &str) -> &mut Self {
        self.factories.remove(name);
        self
    }

    /// Returns `true` if a factory is registered under `name`.
    pub fn has_factory(&self, name: &str) -> bool {
        self.factories.contains(name)
    }

    /// Names of all registered factories, sorted.
    pub fn factory_names(&self) -> Vec<String> {
        self.factories.names()
    }

    /// Returns the factory registered under `name`.
    pub fn factory(&self, name: &str) -> Option<Arc<dyn Factory>> {
        let factory = self.factories.get(name).cloned();
        if factory.is_none() {
            trace_miss(name, &self.factories);
        }
        factory
    }

    // ── Providers ──

    /// Lets `provider` register its values and factories.
    pub fn add_provider(&mut self, provider: &dyn Provider) -> &mut Self {
        debug!(provider = provider.name(), "Adding provider");
        provider.register(self);
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("values", &self.values.names())
            .field("factories", &self.factories.names())
            .finish()
    }
}

fn trace_miss<V>(name: &str, registry: &Registry<V>) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let suggestions = suggest_similar(name, &registry.names(), MAX_SUGGESTIONS);
    if !suggestions.is_empty() {
        trace!(name, did_you_mean = %render_names(&suggestions), "Lookup missed");
    }
}

/// Downcasts a constructed instance, naming both types on mismatch.
pub(crate) fn downcast_instance<T: Any>(
    name: &str,
    factory: &dyn Factory,
    instance: Instance,
) -> Result<T> {
    instance
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| SidiError::InstanceType {
            name: name.to_string(),
            expected: type_name::<T>(),
            produced: factory.produces(),
        })
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, Value};
    pub use crate::args;
    pub use crate::args::Args;
    pub use crate::error::{Result, SidiError};
    pub use crate::factory::{Construct, Constructor, Factory, FnFactory, Instance};
    pub use crate::global::global;
    pub use crate::provider::Provider;
    pub use crate::shared::SharedContainer;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Data {
        some: &'static str,
        items: Vec<&'static str>,
    }

    fn data1() -> Data {
        Data { some: "stuff", items: vec!["here"] }
    }

    fn data2() -> Data {
        Data { some: "more", items: vec!["in", "here"] }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        color: String,
        size: u32,
    }

    impl Widget {
        fn area(&self) -> u32 {
            self.size * self.size
        }
    }

    impl Construct for Widget {
        fn construct(args: &mut Args) -> Result<Self> {
            Ok(Widget {
                color: args.take::<&str>(0)?.to_string(),
                size: args.take(1)?,
            })
        }
    }

    #[test]
    fn set_chains_and_get_returns_same_allocation() {
        let d1 = Arc::new(data1());
        let d2 = Arc::new(data2());

        let mut container = Container::new();
        container
            .set_shared("data1", d1.clone())
            .set_shared("data2", d2.clone());

        assert!(Arc::ptr_eq(&container.get::<Data>("data1").unwrap(), &d1));
        assert!(Arc::ptr_eq(&container.get::<Data>("data2").unwrap(), &d2));
    }

    #[test]
    fn equal_values_stay_distinct() {
        let mut container = Container::new();
        container.set("data2", data2()).set("data2_copy", data2());

        let a = container.get::<Data>("data2").unwrap();
        let b = container.get::<Data>("data2_copy").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_get_shares_identity() {
        let mut container = Container::new();
        container.set("data", data1());

        let a = container.get::<Data>("data").unwrap();
        let b = container.get::<Data>("data").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn set_overwrites() {
        let d1 = Arc::new(data1());
        let d2 = Arc::new(data2());

        let mut container = Container::new();
        container.set_shared("data", d1.clone());
        container.set_shared("data", d2.clone());

        let current = container.get::<Data>("data").unwrap();
        assert!(Arc::ptr_eq(&current, &d2));
        assert!(!Arc::ptr_eq(&current, &d1));
        // the container no longer holds the first value
        assert_eq!(Arc::strong_count(&d1), 1);
    }

    #[test]
    fn overwrite_may_change_type() {
        let mut container = Container::new();
        container.set("port", 8080u16).set("port", String::from("8080"));

        assert!(container.get::<u16>("port").is_none());
        assert_eq!(container.get::<String>("port").unwrap().as_str(), "8080");
    }

    #[test]
    fn mutation_through_stored_value_is_visible() {
        let mut container = Container::new();
        container.set("hits", Mutex::new(0u32));

        *container.get::<Mutex<u32>>("hits").unwrap().lock().unwrap() += 1;
        *container.get::<Mutex<u32>>("hits").unwrap().lock().unwrap() += 1;

        assert_eq!(*container.get::<Mutex<u32>>("hits").unwrap().lock().unwrap(), 2);
    }

    #[test]
    fn clear_removes_values() {
        let mut container = Container::new();
        container.set("data1", data1()).set("data2", data2());

        container
            .clear("data")
            .clear("data1")
            .clear("data2")
            .clear("data2_copy");

        assert!(container.get::<Data>("data").is_none());
        assert!(container.get::<Data>("data1").is_none());
        assert!(container.get::<Data>("data2").is_none());
        assert!(container.get::<Data>("data2_copy").is_none());
        assert!(container.value_names().is_empty());
    }

    #[test]
    fn clear_then_set_again() {
        let mut container = Container::new();
        container.set("x", 1i32).clear("x").set("x", 2i32);
        assert_eq!(*container.get::<i32>("x").unwrap(), 2);
    }

    #[test]
    fn get_unset_is_none() {
        let container = Container::new();
        assert!(container.get::<Data>("should.be.none").is_none());
        assert!(container.get_any("should.be.none").is_none());
    }

    #[test]
    fn falsy_values_are_stored() {
        let mut container = Container::new();
        container
            .set("zero", 0i32)
            .set("empty", String::new())
            .set("no", false)
            .set("nothing", ());

        assert_eq!(*container.get::<i32>("zero").unwrap(), 0);
        assert_eq!(container.get::<String>("empty").unwrap().as_str(), "");
        assert!(!*container.get::<bool>("no").unwrap());
        assert!(container.get::<()>("nothing").is_some());
    }

    #[test]
    fn set_if_present_none_is_noop() {
        let mut container = Container::new();
        container.set_if_present("fresh", None::<i32>);
        assert!(!container.contains("fresh"));

        container.set("kept", 1i32).set_if_present("kept", None::<i32>);
        assert_eq!(*container.get::<i32>("kept").unwrap(), 1);

        container.set_if_present("kept", Some(2i32));
        assert_eq!(*container.get::<i32>("kept").unwrap(), 2);
    }

    #[test]
    fn try_get_reports_type_mismatch() {
        let mut container = Container::new();
        container.set("port", 8080u16);

        assert!(container.try_get::<u16>("port").unwrap().is_some());
        assert!(container.try_get::<u16>("missing").unwrap().is_none());

        match container.try_get::<String>("port") {
            Err(SidiError::ValueType { name, expected }) => {
                assert_eq!(name, "port");
                assert!(expected.contains("String"));
            }
            other => panic!("Expected ValueType, got: {other:?}"),
        }
    }

    #[test]
    fn register_type_and_create() {
        let mut container = Container::new();
        container
            .register_type::<Widget>("widget")
            .register_type::<Widget>("widget2");

        let w = container.create("widget", args!["red", 5u32]).unwrap().unwrap();
        assert!(w.is::<Widget>());

        let w = container.create("widget2", args!["blue", 1u32]).unwrap().unwrap();
        assert!(w.is::<Widget>());
    }

    #[test]
    fn create_passes_arguments_in_order() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();

        let mut container = Container::new();
        container.set_factory("class", {
            let seen = seen.clone();
            move |args: Args| {
                let mut seen = seen.lock().unwrap();
                seen.push(args.arg::<&str>(0)?.to_string());
                seen.push(args.arg::<Data>(1)?.some.to_string());
                assert!(args.get::<i32>(2).is_none());
                Ok(())
            }
        });

        container
            .create("class", args!["param1", data2()])
            .unwrap()
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["param1", "more"]);
    }

    #[test]
    fn created_instance_has_type_methods() {
        let mut container = Container::new();
        container.register_type::<Widget>("widget");

        let w: Widget = container
            .create_as("widget", args!["red", 3u32])
            .unwrap()
            .unwrap();
        assert_eq!(w.area(), 9);
        assert_eq!(w.color, "red");
    }

    #[test]
    fn create_returns_distinct_instances() {
        let mut container = Container::new();
        container.set_factory("boxed", |args: Args| Ok(Arc::new(*args.arg::<u32>(0)?)));

        let a: Arc<u32> = container.create_as("boxed", args![7u32]).unwrap().unwrap();
        let b: Arc<u32> = container.create_as("boxed", args![7u32]).unwrap().unwrap();
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn factory_called_once_per_create() {
        let counter = Arc::new(AtomicUsize::new(0));

        let mut container = Container::new();
        container.set_factory("count", {
            let counter = counter.clone();
            move |_: Args| Ok(counter.fetch_add(1, Ordering::SeqCst))
        });

        let a: usize = container.create_as("count", args![]).unwrap().unwrap();
        let b: usize = container.create_as("count", args![]).unwrap().unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn create_unregistered_is_none() {
        let container = Container::new();
        assert!(container.create("nope", args![1u8]).unwrap().is_none());
        assert!(container.create_as::<Widget>("nope", args![]).unwrap().is_none());
    }

    #[test]
    fn absent_factory_is_rejected_silently() {
        type WidgetFn = fn(Args) -> Result<Widget>;

        let mut container = Container::new();
        container.set_factory_if_present("widget", None::<WidgetFn>);

        assert!(!container.has_factory("widget"));
        assert!(container.create("widget", args![]).unwrap().is_none());
    }

    #[test]
    fn absent_factory_keeps_existing_registration() {
        type WidgetFn = fn(Args) -> Result<Widget>;

        let mut container = Container::new();
        container
            .register_type::<Widget>("widget")
            .set_factory_if_present("widget", None::<WidgetFn>);

        assert!(container.has_factory("widget"));
    }

    #[test]
    fn set_factory_replaces_previous() {
        let mut container = Container::new();
        container
            .set_factory("n", |_: Args| Ok(1u8))
            .set_factory("n", |_: Args| Ok(2u8));

        assert_eq!(container.create_as::<u8>("n", args![]).unwrap(), Some(2));
        assert_eq!(container.factory_names(), vec!["n"]);
    }

    #[test]
    fn clear_factory() {
        let mut container = Container::new();
        container.register_type::<Widget>("class");
        container.clear_factory("class");

        assert!(container.create("class", args![]).unwrap().is_none());
        // clearing again is fine
        container.clear_factory("class");
    }

    #[test]
    fn construction_error_propagates_unchanged() {
        let mut container = Container::new();
        container.set_factory("fails", |_: Args| -> Result<Widget> {
            Err(SidiError::construction("out of paint"))
        });
        container.register_type::<Widget>("widget");

        let err = container.create("fails", args![]).unwrap_err();
        assert_eq!(err.to_string(), "Construction failed: out of paint");

        let err = container.create("widget", args!["red"]).unwrap_err();
        assert!(matches!(err, SidiError::ArgumentMissing { index: 1, .. }));
    }

    #[test]
    fn create_as_wrong_type() {
        let mut container = Container::new();
        container.register_type::<Widget>("widget");

        match container.create_as::<String>("widget", args!["red", 1u32]) {
            Err(SidiError::InstanceType { name, expected, produced }) => {
                assert_eq!(name, "widget");
                assert!(expected.contains("String"));
                assert!(produced.contains("Widget"));
            }
            other => panic!("Expected InstanceType, got: {other:?}"),
        }
    }

    #[test]
    fn namespaces_are_independent() {
        let mut container = Container::new();
        container
            .set("widget", String::from("a value"))
            .register_type::<Widget>("widget");

        assert!(container.contains("widget"));
        assert!(container.has_factory("widget"));

        container.clear("widget");
        assert!(container.has_factory("widget"));

        container.set("widget", 1i32).clear_factory("widget");
        assert!(container.contains("widget"));
    }

    #[test]
    fn debug_lists_names() {
        let mut container = Container::new();
        container
            .set("b", 1i32)
            .set("a", 2i32)
            .register_type::<Widget>("widget");

        let debug = format!("{container:?}");
        assert_eq!(
            debug,
            r#"Container { values: ["a", "b"], factories: ["widget"] }"#
        );
    }
}
