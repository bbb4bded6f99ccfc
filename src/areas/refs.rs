//! Reference management
//!
//! Two scalar files under the metadata root:
//!
//! - `references.txt`: ordered lines of `<name>=<commit-id>`, always
//!   containing `HEAD` once any commit exists and `master` from the first
//!   commit on. Absent before the first commit.
//! - `activated.txt`: the name of the active branch, initialized to
//!   `master`.
//!
//! Every read-modify-write of the reference set runs under an exclusive
//! advisory lock scoped to the metadata root, and both files are persisted
//! by writing a sibling temp file and renaming it into place, so concurrent
//! invocations cannot lose updates and a crash never leaves a torn file.

use crate::artifacts::objects::commit_id::CommitId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";

/// Ordered branch-name → commit-id bindings
///
/// Order is preserved so the on-disk file round-trips byte-for-byte, with
/// `HEAD` staying on the first line after bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefSet {
    entries: Vec<(String, CommitId)>,
}

impl RefSet {
    /// Reference set right after the first commit: `HEAD = master = id`
    pub fn bootstrap(commit_id: CommitId) -> Self {
        RefSet {
            entries: vec![
                (HEAD_REF_NAME.to_string(), commit_id.clone()),
                (DEFAULT_BRANCH.to_string(), commit_id),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommitId> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, id)| id)
    }

    pub fn head(&self) -> anyhow::Result<&CommitId> {
        self.get(HEAD_REF_NAME)
            .ok_or_else(|| anyhow::anyhow!("reference set has no HEAD entry"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rebind `name`, appending it when not yet present
    pub fn set(&mut self, name: &str, commit_id: CommitId) {
        match self
            .entries
            .iter_mut()
            .find(|(entry_name, _)| entry_name == name)
        {
            Some((_, id)) => *id = commit_id,
            None => self.entries.push((name.to_string(), commit_id)),
        }
    }

    /// Branch names available as checkout/merge targets, i.e. everything
    /// except the reserved `HEAD` and `master` entries.
    pub fn plain_branch_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| *name != HEAD_REF_NAME && *name != DEFAULT_BRANCH)
    }

    fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|(name, id)| format!("{}={}\n", name, id))
            .collect()
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        let entries = raw
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (name, id) = line
                    .split_once('=')
                    .with_context(|| format!("malformed reference line: {:?}", line))?;
                Ok((name.to_string(), CommitId::try_parse(id.to_string())?))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(RefSet { entries })
    }
}

/// Reference store rooted at the metadata directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata root (the `.wit` directory)
    path: Box<Path>,
}

impl Refs {
    /// Read the reference set; `None` before the first commit
    pub fn read(&self) -> anyhow::Result<Option<RefSet>> {
        let path = self.references_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read references at {:?}", path))?;

        Ok(Some(RefSet::parse(&content)?))
    }

    /// Atomically transform the reference set under the repository lock
    ///
    /// The closure receives the current set (`None` before the first commit)
    /// and returns the set to persist. Errors from the closure abort without
    /// writing anything.
    pub fn update(
        &self,
        transform: impl FnOnce(Option<RefSet>) -> anyhow::Result<RefSet>,
    ) -> anyhow::Result<RefSet> {
        self.with_lock(|| {
            let refset = transform(self.read()?)?;
            self.replace_file(&self.references_path(), &refset.serialize())?;
            Ok(refset)
        })
    }

    /// Name of the branch that advances on commit
    pub fn active_branch(&self) -> anyhow::Result<String> {
        let path = self.activated_path();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read active branch at {:?}", path))?;

        Ok(content.trim().to_string())
    }

    pub fn set_active_branch(&self, name: &str) -> anyhow::Result<()> {
        self.with_lock(|| self.replace_file(&self.activated_path(), name))
    }

    pub fn references_path(&self) -> PathBuf {
        self.path.join("references.txt")
    }

    pub fn activated_path(&self) -> PathBuf {
        self.path.join("activated.txt")
    }

    fn lock_path(&self) -> PathBuf {
        self.path.join("wit.lock")
    }

    /// Run `action` holding the exclusive advisory lock for this repository
    fn with_lock<T>(&self, action: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
        let mut lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .with_context(|| format!("failed to open lock file at {:?}", self.lock_path()))?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)?;

        action()
    }

    /// Write-new-file-then-rename so readers never observe a torn file
    fn replace_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        let temp_path = path.with_extension("txt.tmp");

        std::fs::write(&temp_path, content)
            .with_context(|| format!("failed to write {:?}", temp_path))?;
        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to move {:?} into place", temp_path))?;

        Ok(())
    }
}
