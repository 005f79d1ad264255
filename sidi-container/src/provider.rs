//! Provider trait — a module of related registrations.
//!
//! Providers group values and factories that belong together, so an
//! application can assemble its container from a few named modules
//! instead of one long registration block.
//!
//! # Examples
//! ```rust
//! use sidi_container::prelude::*;
//!
//! struct Mailer {
//!     host: String,
//! }
//!
//! struct MailProvider;
//!
//! impl Provider for MailProvider {
//!     fn register(&self, container: &mut Container) {
//!         container
//!             .set("mail.host", String::from("smtp.local"))
//!             .set_factory("mailer", |mut args: Args| {
//!                 Ok(Mailer { host: args.take(0)? })
//!             });
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.add_provider(&MailProvider);
//!
//! assert!(container.contains("mail.host"));
//! assert!(container.has_factory("mailer"));
//! ```

use crate::container::Container;

/// A module that registers related values and factories.
///
/// Called once from
/// [`Container::add_provider`](crate::container::Container::add_provider).
pub trait Provider {
    /// Register values and factories into `container`.
    fn register(&self, container: &mut Container);

    /// Human-readable name used in log events.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
