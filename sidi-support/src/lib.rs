//! # SiDI Support
//!
//! Shared helpers for the SiDI container crates.
//!
//! This crate provides:
//! - Text rendering for error messages and diagnostics
//! - "Did you mean?" matching over registered names

pub mod rendering;
