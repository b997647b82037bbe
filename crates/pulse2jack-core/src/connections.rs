//! The `jack-connections` file read by the bridging process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Environment variable overriding the Pulse user configuration directory.
pub const PULSE_CONFIG_DIR_ENV: &str = "PULSE_USER_CONFIG_DIR";

/// File name of the generated connection list.
pub const CONNECTIONS_FILE_NAME: &str = "jack-connections";

/// Location of the generated connection file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionFile {
    dir: PathBuf,
}

impl ConnectionFile {
    /// Use `dir` as the Pulse user configuration directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the directory from `PULSE_USER_CONFIG_DIR`, falling back to `~/.pulse`.
    ///
    /// # Errors
    /// Returns [`Error::NoHomeDir`] if neither is available.
    pub fn from_env() -> Result<Self> {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let dir = resolve_dir(std::env::var_os(PULSE_CONFIG_DIR_ENV), home.as_deref())
            .ok_or(Error::NoHomeDir)?;
        debug!(?dir, "Resolved Pulse config directory");
        Ok(Self { dir })
    }

    /// The Pulse user configuration directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the connection file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(CONNECTIONS_FILE_NAME)
    }

    /// Create the configuration directory if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            info!(dir = ?self.dir, "Creating Pulse config directory");
            std::fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Overwrite the file with one line per encoded bridge.
    ///
    /// The write is not atomic. The file always ends with a newline.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write(&self, lines: &[String]) -> Result<()> {
        let mut contents = lines.join("\n");
        contents.push('\n');

        let path = self.path();
        std::fs::write(&path, contents)?;
        debug!(?path, count = lines.len(), "Wrote connection file");
        Ok(())
    }

    /// Read the encoded lines back, skipping blank lines.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn read(&self) -> Result<Vec<String>> {
        let contents = std::fs::read_to_string(self.path())?;
        Ok(contents.lines().filter(|line| !line.is_empty()).map(str::to_string).collect())
    }
}

/// Pick the Pulse config directory from an override value and a home directory.
///
/// An empty override counts as unset.
#[must_use]
pub fn resolve_dir(env_value: Option<OsString>, home: Option<&Path>) -> Option<PathBuf> {
    match env_value {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => home.map(|home| home.join(".pulse")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_dir_prefers_override() {
        let dir = resolve_dir(Some("/tmp/pulse".into()), Some(Path::new("/home/user")));
        assert_eq!(dir, Some(PathBuf::from("/tmp/pulse")));
    }

    #[test]
    fn test_resolve_dir_falls_back_to_home() {
        let home = Path::new("/home/user");
        assert_eq!(resolve_dir(None, Some(home)), Some(PathBuf::from("/home/user/.pulse")));
        assert_eq!(resolve_dir(Some(OsString::new()), Some(home)), Some(home.join(".pulse")));
        assert_eq!(resolve_dir(None, None), None);
    }

    #[test]
    fn test_ensure_dir_creates_missing() {
        let temp = TempDir::new().unwrap();
        let file = ConnectionFile::new(temp.path().join("nested/.pulse"));

        file.ensure_dir().unwrap();
        assert!(file.dir().is_dir());

        // Second call is a no-op
        file.ensure_dir().unwrap();
    }

    #[test]
    fn test_write_trailing_newline_and_overwrite() {
        let temp = TempDir::new().unwrap();
        let file = ConnectionFile::new(temp.path());

        file.write(&["a|source|2|True".to_string(), "b|sink|1|False".to_string()]).unwrap();
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "a|source|2|True\nb|sink|1|False\n"
        );

        file.write(&["c|sink|2|True".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "c|sink|2|True\n");
        assert_eq!(file.read().unwrap(), vec!["c|sink|2|True".to_string()]);
    }

    #[test]
    fn test_write_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let file = ConnectionFile::new(temp.path().join("missing"));
        assert!(matches!(file.write(&["a|sink|2|True".to_string()]), Err(Error::Io(_))));
    }
}
