//! Core container implementation for SiDI.

pub mod args;
pub mod container;
pub mod error;
pub mod factory;
pub mod global;
pub mod provider;
mod registry;
pub mod shared;

pub use args::Args;
pub use container::{Container, prelude};
pub use error::{Result, SidiError};
pub use factory::{Construct, Factory, Instance};
pub use global::global;
pub use shared::SharedContainer;
