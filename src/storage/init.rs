//! Storage initialization
//!
//! Handles first-run setup: directories and empty data files.

use crate::config::paths::TallyPaths;
use crate::error::TallyError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and empty data files so later loads see a
/// consistent store. Existing files are left untouched.
pub fn initialize_storage(paths: &TallyPaths) -> Result<(), TallyError> {
    paths.ensure_directories()?;

    let empty_files = [
        (paths.accounts_file(), "accounts"),
        (paths.cash_flows_file(), "cash_flows"),
        (paths.transfers_file(), "transfers"),
    ];

    for (file, key) in empty_files {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({ key: [] }))?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TallyPaths) -> bool {
    !paths.accounts_file().exists()
}
