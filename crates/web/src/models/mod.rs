//! Domain models for the cafe directory.

pub mod cafe;

pub use cafe::{Cafe, CafeUpdate, NewCafe};
