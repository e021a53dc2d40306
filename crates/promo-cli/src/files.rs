//! File access shared by the settings and order loaders.

use std::path::Path;

use crate::error::{CliError, CliResult};

/// Reads a whole file as UTF-8, keeping the path in the error.
pub fn read_to_string(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
