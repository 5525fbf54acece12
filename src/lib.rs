//! Library crate for user-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, controller flows and the update loop (`app`)
//! - Command-line options and config file locations (`config`)
//! - Data access layer over the store (`data`)
//! - Error and result types (`error`)
//! - Persistence backends for the `User` table (`store`)
//! - UI rendering and widgets (`ui`)
//! - Form validation rules (`validate`)
//!
//! It is used by the `user-manager` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod store;
pub mod ui;
pub mod validate;

/// Convenient result type shared across the crate.
pub use error::Result;
