//! Plain text file loading.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the whole file at `path` verbatim.
///
/// No preprocessing or include resolution is applied.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("failed to open file: {}", path.display()))
}
