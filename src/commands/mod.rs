//! Command implementations
//!
//! User-facing commands live in `porcelain`, one file per command, as
//! methods on the repository handle (plus the free-standing `init`, which
//! runs before a handle can exist).

pub mod porcelain;
