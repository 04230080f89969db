//! Single-verifier file persistence.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use getrandom::fill;

use crate::format::Verifier;

/// A file holding exactly one stored verifier.
///
/// The verifier is written as one line of text. Contents are not validated on
/// load; [`crate::verify`] decides whether they are well formed.
#[derive(Debug, Clone)]
pub struct VerifierFile {
    path: PathBuf,
}

impl VerifierFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `true` if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored verifier, without its trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    pub fn load(&self) -> io::Result<String> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(raw.trim_end().to_string())
    }

    /// Replaces the file contents with `verifier`.
    ///
    /// Writes to a randomly named sibling, fsyncs it, then renames it over the
    /// target, so a crash leaves either the old or the new verifier behind.
    /// Creates parent directories if they don't exist.
    pub fn save(&self, verifier: &Verifier) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.random_tmp_path()?;

        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;

        // any failure past this point must not leave the sibling behind
        let written = write_line(&mut tmp_file, verifier.as_str());
        drop(tmp_file);
        if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, &self.path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        #[cfg(unix)]
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            File::open(parent)?.sync_all()?;
        }

        tracing::debug!(path = %self.path.display(), "verifier saved");
        Ok(())
    }

    /// `<name>.tmp.<16 hex chars>` next to the target.
    fn random_tmp_path(&self) -> io::Result<PathBuf> {
        let mut buf = [0u8; 8];
        fill(&mut buf).map_err(|e| io::Error::other(e.to_string()))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "verifier path has no file name")
            })?
            .to_string_lossy();

        Ok(self
            .path
            .with_file_name(format!("{file_name}.tmp.{}", hex::encode(buf))))
    }
}

fn write_line(file: &mut File, line: &str) -> io::Result<()> {
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()
}

/// Default verifier location in the per-user data directory.
pub fn default_verifier_file() -> io::Result<VerifierFile> {
    let project_dirs = ProjectDirs::from("", "", "credhash").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine platform directories")
    })?;

    Ok(VerifierFile::new(project_dirs.data_dir().join("verifier")))
}
