//! Repository handle and discovery
//!
//! Every operation starts from a [`Repository`]: an explicit handle over
//! the metadata root and its component stores, created by walking upward
//! from the current directory until a `.wit` directory is found. The chain
//! of directories traversed on the way up becomes the prefix used to mirror
//! the current subdirectory into the staging area.

use crate::areas::images::ImageStore;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::WitError;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the metadata root directory
pub const METADATA_DIR: &str = ".wit";

pub struct Repository {
    root: Box<Path>,
    /// Current directory relative to the repository root; empty at the root
    prefix: PathBuf,
    writer: RefCell<Box<dyn std::io::Write>>,
    images: ImageStore,
    staging: Arc<Mutex<StagingArea>>,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    /// Locate the repository containing `start`
    ///
    /// Walks upward until a directory holding `.wit` is found; reaching the
    /// filesystem root without one fails with
    /// [`WitError::NotInitialized`].
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;
        let mut root = start.clone();

        while !root.join(METADATA_DIR).is_dir() {
            root = match root.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Err(WitError::NotInitialized.into()),
            };
        }

        let prefix = start
            .strip_prefix(&root)
            .expect("start is always below the discovered root")
            .to_path_buf();

        Ok(Self::open(root, prefix, writer))
    }

    fn open(root: PathBuf, prefix: PathBuf, writer: Box<dyn std::io::Write>) -> Self {
        let wit_path = root.join(METADATA_DIR);

        let images = ImageStore::new(wit_path.join("images").into_boxed_path());
        let staging = StagingArea::new(wit_path.join("staging_area").into_boxed_path());
        let refs = Refs::new(wit_path.clone().into_boxed_path());
        let workspace = Workspace::new(root.clone().into_boxed_path());

        Repository {
            root: root.into_boxed_path(),
            prefix,
            writer: RefCell::new(writer),
            images,
            staging: Arc::new(Mutex::new(staging)),
            refs,
            workspace,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current directory relative to the repository root
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn wit_path(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    pub fn writer(&'_ self) -> std::cell::RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn staging(&self) -> Arc<Mutex<StagingArea>> {
        self.staging.clone()
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn inspector(&'_ self) -> Inspector<'_> {
        Inspector::new(self)
    }
}
