//! Core types for the cafe directory.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod web_url;

pub use id::*;
pub use price::{CoffeePrice, PriceError};
pub use web_url::{UrlError, WebUrl};
