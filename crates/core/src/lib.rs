//! Cafe Directory Core - Shared types library.
//!
//! This crate provides common types used across the cafe directory components:
//! - `web` - Server-rendered directory site
//! - `cli` - Command-line tools for migrations and bulk import
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. SQLite encoding for IDs is available behind the
//! `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for cafe IDs, coffee prices and web URLs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
