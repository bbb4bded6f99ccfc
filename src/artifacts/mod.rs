//! Repository data structures and algorithms
//!
//! - `core`: raw file copy/delete primitives shared by every area
//! - `graph`: first-parent history traversal for the visualization hand-off
//! - `merge`: ancestor sets and merge-base selection
//! - `objects`: commit identifiers and metadata records
//! - `status`: working tree / staging area / snapshot comparison

pub mod core;
pub mod graph;
pub mod merge;
pub mod objects;
pub mod status;
