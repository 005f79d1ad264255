//! Construction arguments handed to a factory by [`Container::create`].
//!
//! [`Args`] is an ordered, heterogeneous list. Factories read it by
//! position, either borrowing ([`Args::arg`]) or moving values out
//! ([`Args::take`]).
//!
//! [`Container::create`]: crate::container::Container::create

use std::any::{Any, type_name};
use std::fmt;

use crate::error::{Result, SidiError};

struct Arg {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

/// Ordered list of construction arguments.
///
/// # Examples
/// ```
/// use sidi_container::args;
///
/// let args = args!["red", 5u32];
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.get::<&str>(0), Some(&"red"));
/// assert_eq!(args.get::<u32>(1), Some(&5));
/// assert_eq!(args.get::<u32>(2), None);
/// ```
#[derive(Default)]
pub struct Args {
    slots: Vec<Option<Arg>>,
}

impl Args {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument, builder style.
    pub fn with<T: Any + Send>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Appends an argument.
    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.slots.push(Some(Arg {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }));
    }

    /// Number of positions, including ones already taken.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrows argument `index` if it exists and is a `T`.
    ///
    /// Missing trailing arguments read as `None`, so factories can
    /// treat them as optional.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.slot(index)?.value.downcast_ref::<T>()
    }

    /// Borrows argument `index`, reporting why it is unusable.
    pub fn arg<T: Any>(&self, index: usize) -> Result<&T> {
        let slot = self.slot(index).ok_or(SidiError::ArgumentMissing {
            index,
            expected: type_name::<T>(),
        })?;
        slot.value
            .downcast_ref::<T>()
            .ok_or(SidiError::ArgumentType {
                index,
                expected: type_name::<T>(),
                found: slot.type_name,
            })
    }

    /// Moves argument `index` out of the list.
    ///
    /// A taken position reads as missing afterwards. On a type mismatch
    /// the argument stays in place.
    pub fn take<T: Any>(&mut self, index: usize) -> Result<T> {
        let missing = || SidiError::ArgumentMissing {
            index,
            expected: type_name::<T>(),
        };
        let slot = self.slots.get_mut(index).ok_or_else(missing)?;
        let arg = slot.take().ok_or_else(missing)?;

        match arg.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => {
                let found = arg.type_name;
                *slot = Some(Arg {
                    value,
                    type_name: found,
                });
                Err(SidiError::ArgumentType {
                    index,
                    expected: type_name::<T>(),
                    found,
                })
            }
        }
    }

    /// Type names of the remaining arguments, `None` for taken slots.
    pub fn type_names(&self) -> Vec<Option<&'static str>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|arg| arg.type_name))
            .collect()
    }

    fn slot(&self, index: usize) -> Option<&Arg> {
        self.slots.get(index)?.as_ref()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}

/// Builds an [`Args`] list from positional values.
///
/// ```
/// use sidi_container::args;
///
/// let empty = args![];
/// assert!(empty.is_empty());
///
/// let two = args![String::from("red"), 5i64];
/// assert_eq!(two.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::args::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::args::Args::new()$(.with($value))+
    };
}
