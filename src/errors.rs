//! Failure taxonomy for repository operations
//!
//! Soft failures (already-initialized, unknown targets, branch-creation
//! guards) print guidance and leave all repository state untouched; hard
//! failures abort the running operation. Both exit non-zero from the CLI.

use crate::artifacts::objects::commit_id::CommitId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WitError {
    #[error("no '.wit' found in the current directory or any directory above it")]
    NotInitialized,

    #[error("{0} already contains a '.wit' directory")]
    AlreadyInitialized(PathBuf),

    #[error("no changes were made since the last commit; everything is saved in '{0}'")]
    NoChangesToCommit(CommitId),

    #[error("there are still changes to be committed or not staged for commit")]
    PendingChangesLeft,

    #[error("'{0}' was not found")]
    NotFound(String),

    #[error("unknown checkout target '{0}': not a commit id or a known branch")]
    UnknownCheckoutTarget(String),

    #[error("a branch named '{0}' already exists; pick another name")]
    BranchAlreadyExists(String),

    #[error("this operation needs at least one commit")]
    NoCommitsYet,

    #[error("unknown merge branch '{0}'")]
    UnknownMergeBranch(String),

    #[error("merge conflict: both histories changed {}", .0.join(", "))]
    MergeConflict(Vec<String>),
}
