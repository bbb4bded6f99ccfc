//! Working directory file system operations
//!
//! All walks are relative-path based and always exclude the metadata root.

use crate::areas::repository::METADATA_DIR;
use crate::artifacts::core::copy_file;
use anyhow::Context;
use derive_new::new;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct Workspace {
    /// Repository root (the directory containing the metadata root)
    path: Box<Path>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every working-tree file as a path relative to the repository root
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(WalkDir::new(self.path.as_ref())
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .ok()
            })
            .filter(|path| !Self::is_ignored(path))
            .collect::<Vec<_>>())
    }

    /// Delete every tracked working-tree file, leaving untracked ones alone
    ///
    /// Directories stay in place; only files are removed. The metadata root
    /// is never entered.
    pub fn delete_tracked_files(&self, untracked: &HashSet<PathBuf>) -> anyhow::Result<()> {
        for relative_path in self.list_files()? {
            if untracked.contains(&relative_path) {
                continue;
            }

            let path = self.path.join(&relative_path);
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to delete tracked file {:?}", path))?;
        }

        Ok(())
    }

    /// Copy a snapshot's files into the working tree
    ///
    /// Existing files are left untouched; after `delete_tracked_files` only
    /// surviving untracked content still exists, and it wins over the
    /// snapshot.
    pub fn restore_snapshot(&self, snapshot: &Path) -> anyhow::Result<()> {
        for entry in WalkDir::new(snapshot)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
        {
            let relative_path = entry
                .path()
                .strip_prefix(snapshot)
                .context("snapshot walk escaped the snapshot root")?;
            let dest = self.path.join(relative_path);

            if !dest.exists() {
                copy_file(entry.path(), &dest)?;
            }
        }

        Ok(())
    }

    fn is_ignored(relative_path: &Path) -> bool {
        relative_path.components().any(|component| {
            matches!(component, Component::Normal(name) if name == METADATA_DIR)
        })
    }
}
