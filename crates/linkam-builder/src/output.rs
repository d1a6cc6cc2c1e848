//! Writing generated files

use crate::build::IocBuild;
use crate::error::{BuildError, BuildResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the boot-script fragment
pub const STARTUP_FILE: &str = "st.cmd.linkam";

/// File name of the dependency manifest
pub const MANIFEST_FILE: &str = "dependencies.yaml";

/// Paths of the files produced by [`write_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// `<ioc_name>.substitutions`
    pub substitutions: PathBuf,
    /// Boot-script fragment
    pub startup: PathBuf,
    /// Dependency manifest
    pub manifest: PathBuf,
}

/// Render every output of a build into `out_dir`
///
/// The directory is created if missing. Existing files are overwritten.
pub fn write_all(build: &IocBuild, out_dir: impl AsRef<Path>) -> BuildResult<WrittenFiles> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| BuildError::write(out_dir, e))?;

    let files = WrittenFiles {
        substitutions: out_dir.join(format!("{}.substitutions", build.ioc_name())),
        startup: out_dir.join(STARTUP_FILE),
        manifest: out_dir.join(MANIFEST_FILE),
    };

    write_file(&files.substitutions, &build.render_substitutions())?;
    write_file(&files.startup, &build.render_startup())?;
    write_file(&files.manifest, &build.render_manifest()?)?;

    tracing::info!("Wrote {} outputs to {}", build.ioc_name(), out_dir.display());
    Ok(files)
}

fn write_file(path: &Path, contents: &str) -> BuildResult<()> {
    fs::write(path, contents).map_err(|e| BuildError::write(path, e))?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
