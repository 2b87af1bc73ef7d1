// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use raplamobile_core::Dataset;
use tempfile::TempDir;
use tokio::fs;

/// A temporary directory holding a data file, removed when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// Path of the JSON data file.
    pub data_path: PathBuf,

    dir: TempDir,
}

impl TempDirs {
    /// Creates a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let data_path = dir.path().join("rapla.json");
        Ok(Self { data_path, dir })
    }

    /// Gets the base temporary directory.
    #[must_use]
    pub fn base(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Writes the dataset to [`Self::data_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub async fn write_dataset(&self, data: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(&self.data_path, serde_json::to_string_pretty(data)?).await?;
        Ok(())
    }
}

/// Sets up a temporary directory holding the given dataset.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub async fn setup_data_file(data: &Dataset) -> Result<TempDirs, Box<dyn std::error::Error>> {
    let dirs = TempDirs::new()?;
    dirs.write_dataset(data).await?;
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn temp_dirs_cleanup_on_drop() {
        let base = {
            let dirs = TempDirs::new().unwrap();
            let base = dirs.base();
            assert!(base.exists());
            base
        };
        assert!(!base.exists());
    }

    #[tokio::test]
    async fn setup_data_file_writes_json() {
        let dirs = setup_data_file(&Dataset::default()).await.unwrap();
        let content = fs::read_to_string(&dirs.data_path).await.unwrap();
        assert!(content.contains("\"reservations\""));
    }
}
