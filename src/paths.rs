//! XDG-compliant path resolution for modi.
//!
//! The CLI persists to `$XDG_DATA_HOME/modi/` by default; config lives under
//! `$XDG_CONFIG_HOME/modi/`, following the XDG Base Directory Specification.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(modi::paths::no_home),
        help("Set the HOME environment variable or ensure a valid user profile exists.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(modi::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Global XDG-compliant directories for modi.
#[derive(Debug, Clone)]
pub struct ModiPaths {
    /// `$XDG_CONFIG_HOME/modi/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/modi/`
    pub data_dir: PathBuf,
}

impl ModiPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("modi");

        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/share"))
            .join("modi");

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Create the base directories. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [&self.config_dir, &self.data_dir] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_paths_end_in_modi() {
        // Checks structure without mutating env vars (unsafe in edition 2024).
        let paths = ModiPaths::resolve().unwrap();
        assert!(
            paths.config_dir.to_string_lossy().contains("modi"),
            "config_dir should contain 'modi': {}",
            paths.config_dir.display()
        );
        assert!(
            paths.data_dir.to_string_lossy().contains("modi"),
            "data_dir should contain 'modi': {}",
            paths.data_dir.display()
        );
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = ModiPaths {
            config_dir: dir.path().join("config/modi"),
            data_dir: dir.path().join("data/modi"),
        };
        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();
        assert!(paths.config_dir.is_dir());
        assert!(paths.data_dir.is_dir());
    }
}
