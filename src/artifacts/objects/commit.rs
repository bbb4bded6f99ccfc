//! Commit metadata records
//!
//! Each commit stores one plain-text record next to its snapshot directory:
//!
//! ```text
//! parent=<none | id | id2, id1>
//! date=<MM/DD/YYYY, HH:MM:SS>
//! message=<free text>
//! ```
//!
//! Parents are an ordered list of zero, one or two ids. A root commit
//! serializes the `none` sentinel; a merge commit serializes the branch tip
//! first and the previous head second, which is the legacy on-disk format.

use crate::artifacts::objects::commit_id::CommitId;
use anyhow::Context;
use chrono::NaiveDateTime;
use derive_new::new;

/// Sentinel written in place of a parent id for the repository's first commit
pub const NONE_PARENT: &str = "none";

/// Timestamp format used inside commit records
pub const DATE_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

const RECORD_REGEX: &str = r"^parent=(?<parents>.*)\ndate=(?<date>.*)\nmessage=(?s:(?<message>.*))$";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitRecord {
    /// Zero parents for the first commit, one for a plain commit, two for a merge
    pub parents: Vec<CommitId>,
    pub date: NaiveDateTime,
    pub message: String,
}

impl CommitRecord {
    /// Build a record stamped with the current local time
    pub fn now(parents: Vec<CommitId>, message: String) -> Self {
        CommitRecord::new(parents, chrono::Local::now().naive_local(), message)
    }

    pub fn serialize(&self) -> String {
        format!(
            "parent={}\ndate={}\nmessage={}",
            self.serialize_parents(),
            self.date.format(DATE_FORMAT),
            self.message
        )
    }

    fn serialize_parents(&self) -> String {
        if self.parents.is_empty() {
            NONE_PARENT.to_string()
        } else {
            self.parents
                .iter()
                .map(|id| id.as_ref())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let record_match = regex::Regex::new(RECORD_REGEX)?
            .captures(raw)
            .with_context(|| format!("malformed commit record: {:?}", raw))?;

        let parents = Self::parse_parents(&record_match["parents"])?;
        let date = NaiveDateTime::parse_from_str(&record_match["date"], DATE_FORMAT)
            .with_context(|| format!("malformed commit date: {:?}", &record_match["date"]))?;
        let message = record_match["message"].to_string();

        Ok(CommitRecord::new(parents, date, message))
    }

    fn parse_parents(raw: &str) -> anyhow::Result<Vec<CommitId>> {
        if raw == NONE_PARENT {
            return Ok(Vec::new());
        }

        let parents = raw
            .split(", ")
            .map(|id| CommitId::try_parse(id.to_string()))
            .collect::<anyhow::Result<Vec<_>>>()?;

        if parents.len() > 2 {
            anyhow::bail!("commit record has {} parents, at most 2 allowed", parents.len());
        }

        Ok(parents)
    }
}
