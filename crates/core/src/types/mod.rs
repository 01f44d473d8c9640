//! Core types for Greenbasket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod username;

pub use category::ItemCategory;
pub use id::*;
pub use username::{Username, UsernameError};
