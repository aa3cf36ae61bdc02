//! Flutter-Rust bridge wrapper for santa-core.
//!
//! This crate serves as a thin wrapper that exposes `santa-core` to the
//! Flutter build system via Cargokit. The bridge-facing types live in
//! [`api`].

pub mod api;

pub use santa_core::*;
