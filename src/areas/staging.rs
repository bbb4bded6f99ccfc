//! Staging area
//!
//! A live mirror of the working tree under `staging_area/`, relative-path
//! isomorphic to it, holding the next commit's intended content. Mutated by
//! add/remove and wholesale replaced by checkout and merge.

use crate::artifacts::core::{copy_path, copy_tree_parallel, remove_path};
use crate::errors::WitError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct StagingArea {
    /// Path to the `staging_area` directory under the metadata root
    path: Box<Path>,
}

impl StagingArea {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy a file or directory tree into the staging area at
    /// `relative_path`, creating intermediate directories. A directory
    /// replaces any previously staged tree at that path wholesale; staged
    /// trees are never merged file-by-file.
    pub fn add(&self, source: &Path, relative_path: &Path) -> anyhow::Result<()> {
        let dest = self.path.join(relative_path);

        if dest.exists() && source.is_dir() {
            remove_path(&dest)?;
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create staging directory {:?}", parent))?;
        }

        copy_path(source, &dest)
    }

    /// Delete `relative_path` from the staging area only. The working tree
    /// is never touched.
    pub fn remove(&self, relative_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(relative_path);

        if !path.exists() {
            return Err(WitError::NotFound(relative_path.display().to_string()).into());
        }

        remove_path(&path)
    }

    pub fn contains_file(&self, relative_path: &Path) -> bool {
        self.path.join(relative_path).is_file()
    }

    /// All staged files as paths relative to the repository root
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(WalkDir::new(self.path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .ok()
            })
            .collect::<Vec<_>>())
    }

    /// Drop every staged entry
    pub fn clear(&self) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(self.path.as_ref())? {
            remove_path(&entry?.path())?;
        }

        Ok(())
    }

    /// Replace the entire staging area with the contents of a snapshot
    pub async fn replace_from(&self, snapshot: &Path) -> anyhow::Result<()> {
        self.clear()?;
        copy_tree_parallel(snapshot, self.path.as_ref()).await
    }
}
