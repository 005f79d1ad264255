//! The process-wide container and its accessor.

use once_cell::sync::Lazy;

use crate::shared::SharedContainer;

// Created on first access.
static GLOBAL_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

/// Returns the process-wide shared container.
///
/// Handy for registering values from anywhere in an application.
///
/// # Examples
/// ```
/// use sidi_container::global;
///
/// global().set("app.name", String::from("demo"));
/// assert_eq!(global().get::<String>("app.name").unwrap().as_str(), "demo");
/// ```
pub fn global() -> &'static SharedContainer {
    &GLOBAL_CONTAINER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_is_one_instance() {
        global().set("global.test.value", 11u64);
        assert_eq!(*global().get::<u64>("global.test.value").unwrap(), 11);
        assert!(std::ptr::eq(global(), global()));
        global().clear("global.test.value");
        assert!(!global().contains("global.test.value"));
    }
}
