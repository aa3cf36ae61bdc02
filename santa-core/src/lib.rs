//! Santa Core Library
//!
//! Core functionality for Secret Santa - register participants, draw who
//! gives to whom, and notify every giver by text message.
//! This crate provides the Rust implementation behind the mobile app.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod config;
pub mod draw;
pub mod participant;
pub mod session;

pub use api::SantaCore;
