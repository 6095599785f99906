//! Core types for Paróquia Web.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod wire;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
