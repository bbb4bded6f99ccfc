use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::METADATA_DIR;
use crate::errors::WitError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Create the metadata root in `path`
///
/// Lays out `images/`, `staging_area/` and `activated.txt` bound to the
/// default branch. References appear only with the first commit.
pub fn init(path: &Path, mut writer: Box<dyn std::io::Write>) -> anyhow::Result<()> {
    let wit_path = path.join(METADATA_DIR);

    if wit_path.exists() {
        return Err(WitError::AlreadyInitialized(path.to_path_buf()).into());
    }

    fs::create_dir(&wit_path)
        .with_context(|| format!("failed to create metadata root at {:?}", wit_path))?;
    fs::create_dir(wit_path.join("images")).context("failed to create the image store")?;
    fs::create_dir(wit_path.join("staging_area")).context("failed to create the staging area")?;
    fs::write(wit_path.join("activated.txt"), DEFAULT_BRANCH)
        .context("failed to write the active branch pointer")?;

    writeln!(
        writer,
        "Initialized empty wit repository in {}",
        path.display()
    )?;

    Ok(())
}
