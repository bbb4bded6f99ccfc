use crate::areas::repository::{METADATA_DIR, Repository};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Stage a file or directory
    ///
    /// `path` is resolved against the current directory, then mirrored into
    /// the staging area at its path relative to the repository root.
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let source = Path::new(path);
        let source = if source.is_absolute() {
            source.to_path_buf()
        } else {
            self.root().join(self.prefix()).join(source)
        };
        let source = source
            .canonicalize()
            .with_context(|| format!("no such file or directory: {}", path))?;

        let relative_path = source
            .strip_prefix(self.root())
            .with_context(|| format!("{} is outside the repository", source.display()))?
            .to_path_buf();
        if relative_path.starts_with(METADATA_DIR) {
            anyhow::bail!("cannot stage the {} directory", METADATA_DIR);
        }

        let staging = self.staging();
        let staging = staging.lock().await;
        staging.add(&source, &relative_path)?;

        writeln!(self.writer(), "Staged {}", relative_path.display())?;

        Ok(())
    }
}
