use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Unstage a file or directory; the working tree is left untouched
    pub async fn remove(&mut self, path: &str) -> anyhow::Result<()> {
        let relative_path = self.prefix().join(path);

        let staging = self.staging();
        let staging = staging.lock().await;
        staging.remove(&relative_path)?;

        writeln!(
            self.writer(),
            "Removed {} from the staging area",
            relative_path.display()
        )?;

        Ok(())
    }
}
