//! Raw copy and delete primitives
//!
//! Everything that touches file content on disk goes through here: the
//! staging area, the image store and the checkout engine all reconcile
//! trees with these functions. Sibling entries of a tree carry no ordering
//! requirement, so the top level of a tree copy fans out over blocking
//! tasks.

use crate::areas::repository::METADATA_DIR;
use anyhow::Context;
use std::path::Path;
use tokio::task::JoinSet;

/// Copy a single file, creating missing parent directories.
pub fn copy_file(source: &Path, dest: &Path) -> anyhow::Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directories for {:?}", dest))?;
    }

    std::fs::copy(source, dest)
        .with_context(|| format!("failed to copy {:?} to {:?}", source, dest))?;

    Ok(())
}

/// Copy a file or a directory tree to `dest`.
pub fn copy_path(source: &Path, dest: &Path) -> anyhow::Result<()> {
    if source.is_dir() {
        copy_tree(source, dest)
    } else {
        copy_file(source, dest)
    }
}

/// Recursively copy a directory tree. The metadata root is never copied.
pub fn copy_tree(source: &Path, dest: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create directory {:?}", dest))?;

    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        if entry.file_name() == METADATA_DIR {
            continue;
        }

        copy_path(&entry.path(), &dest.join(entry.file_name()))?;
    }

    Ok(())
}

/// Copy a directory tree, fanning the top-level entries out over blocking
/// tasks. Sibling files are independent, so completion order is irrelevant.
pub async fn copy_tree_parallel(source: &Path, dest: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create directory {:?}", dest))?;

    let mut tasks = JoinSet::new();
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        if entry.file_name() == METADATA_DIR {
            continue;
        }

        let from = entry.path();
        let to = dest.join(entry.file_name());
        tasks.spawn_blocking(move || copy_path(&from, &to));
    }

    while let Some(joined) = tasks.join_next().await {
        joined??;
    }

    Ok(())
}

/// Delete a file or recursively delete a directory.
pub fn remove_path(path: &Path) -> anyhow::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory {:?}", path))?;
    } else {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to remove file {:?}", path))?;
    }

    Ok(())
}

/// Byte-for-byte comparison of two files.
pub fn files_identical(left: &Path, right: &Path) -> anyhow::Result<bool> {
    let left_content = std::fs::read(left).with_context(|| format!("failed to read {:?}", left))?;
    let right_content =
        std::fs::read(right).with_context(|| format!("failed to read {:?}", right))?;

    Ok(left_content == right_content)
}
