use crate::areas::repository::Repository;
use colored::{ColoredString, Colorize};
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Print the three status sections for the current directory
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let staging = self.staging();
        let staging = staging.lock().await;
        let report = self.inspector().report(&staging)?;
        drop(staging);

        match self.refs().read()? {
            Some(refset) => {
                let head = refset.head()?.to_short();
                let active_branch = self.refs().active_branch()?;
                writeln!(
                    self.writer(),
                    "On branch {}, at commit {}\n",
                    active_branch,
                    head
                )?;
            }
            None => writeln!(self.writer(), "No commits yet\n")?,
        }

        self.write_section(
            "Changes to be committed:",
            &report.to_be_committed,
            |path| path.green(),
        )?;
        self.write_section("Changes not staged for commit:", &report.not_staged, |path| {
            path.red()
        })?;
        self.write_section("Untracked files:", &report.untracked, |path| path.red())?;

        if report.to_be_committed.is_empty()
            && report.not_staged.is_empty()
            && report.untracked.is_empty()
        {
            writeln!(self.writer(), "nothing to report, working tree clean")?;
        }

        Ok(())
    }

    fn write_section(
        &self,
        title: &str,
        paths: &[PathBuf],
        paint: impl Fn(String) -> ColoredString,
    ) -> anyhow::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "{}", title)?;
        for path in paths {
            writeln!(self.writer(), "        {}", paint(path.display().to_string()))?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
