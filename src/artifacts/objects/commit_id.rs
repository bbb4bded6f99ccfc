//! Commit identifiers
//!
//! A commit id is an opaque 40-character lowercase hex token. Ids are
//! random rather than content-derived; generation re-rolls until the id is
//! unused so a collision can never silently alias two commits.

use rand::Rng;
use std::fmt;

/// Length of a commit id in hex characters
pub const COMMIT_ID_LEN: usize = 40;

const HEX_ALPHABET: &[u8] = b"0123456789abcdef";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Validate and wrap a raw commit id string
    ///
    /// Accepts exactly [`COMMIT_ID_LEN`] lowercase hex characters.
    pub fn try_parse(raw: String) -> anyhow::Result<Self> {
        if raw.len() != COMMIT_ID_LEN {
            anyhow::bail!(
                "invalid commit id {:?}: expected {} characters, got {}",
                raw,
                COMMIT_ID_LEN,
                raw.len()
            );
        }

        if !raw
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            anyhow::bail!("invalid commit id {:?}: not lowercase hex", raw);
        }

        Ok(CommitId(raw))
    }

    /// Generate a fresh id, re-rolling while `is_taken` reports a collision
    pub fn generate(is_taken: impl Fn(&CommitId) -> bool) -> Self {
        let mut rng = rand::rng();

        loop {
            let raw = (0..COMMIT_ID_LEN)
                .map(|_| HEX_ALPHABET[rng.random_range(0..HEX_ALPHABET.len())] as char)
                .collect::<String>();

            let id = CommitId(raw);
            if !is_taken(&id) {
                return id;
            }
        }
    }

    /// First seven characters, for user-facing excerpts
    pub fn to_short(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
