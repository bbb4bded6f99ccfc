//! Core repository components
//!
//! - `images`: image store holding commit snapshots and metadata records
//! - `refs`: branch bindings, HEAD and the active-branch pointer
//! - `repository`: repository handle, discovery and coordination
//! - `staging`: staging area mirroring the next commit's content
//! - `workspace`: working directory file system operations

pub mod images;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
