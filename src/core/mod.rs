//! Core contact model and repository.

pub mod contact;
pub mod repository;

pub use contact::{check_arity, validate_required, Contact, Field, FIELD_COUNT, HEADERS};
pub use repository::ContactRepository;
