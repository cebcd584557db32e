//! # Ludex Common Library
//!
//! Shared code for the Ludex services including:
//! - Error types
//! - Configuration loading and root folder resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
