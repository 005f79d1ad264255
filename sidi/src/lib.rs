//! # SiDI — Simple Dependency Injection for Rust
//!
//! A small registry of named values and named factories.
//!
//! ```rust
//! use sidi::prelude::*;
//! use std::sync::Arc;
//!
//! let mut container = Container::new();
//! container.set("retries", 3u32);
//!
//! let retries: Arc<u32> = container.get("retries").unwrap();
//! assert_eq!(*retries, 3);
//! ```

pub use sidi_container::*;
pub use sidi_support::*;
