//! # contacts - local contact book
//!
//! Contacts live in a single SQLite table. Records can be added, removed,
//! imported from and exported to small text files carrying a `key: value`
//! metadata block.

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::config::{Config, ImportMapping};
pub use crate::core::{Contact, ContactRepository, Field};
pub use error::{Error, Result};

pub use db::Connection;
