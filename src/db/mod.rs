//! Database layer for the contact book.
//!
//! Handles the SQLite connection, the contacts table schema and row mapping.

mod connection;
pub mod schema;

pub use connection::{Connection, DbPath};
pub use schema::{ContactRow, Schema};
