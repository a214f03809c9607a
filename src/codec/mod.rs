//! Import and export of contacts as metadata-block text files.

pub mod export;
pub mod frontmatter;
pub mod import;

pub use export::{export_fields, export_position};
pub use frontmatter::Metadata;
pub use import::{fields_from_metadata, import_bytes, import_file, import_files};
