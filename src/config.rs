//! Runtime configuration.

use crate::db::DbPath;
use std::path::PathBuf;

/// Default directory exported contacts are written to.
pub const DEFAULT_EXPORT_DIR: &str = "export";

/// How the values of an imported metadata block are matched to columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMapping {
    /// Values are taken in document order and must already follow the
    /// canonical column order. Keys are ignored.
    #[default]
    Positional,
    /// Values are placed by their key; unknown keys are ignored and missing
    /// ones become empty.
    ByLabel,
}

/// Contact book configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: DbPath,
    pub export_dir: PathBuf,
    pub import_mapping: ImportMapping,
    /// Write an `Email` line on export. Off by default to keep the
    /// established export format.
    pub export_email: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DbPath::default_path(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            import_mapping: ImportMapping::Positional,
            export_email: false,
        }
    }
}
