use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::error::LaunchError;

pub const DEFAULT_WORKSPACE_ROOT: &str = "/opt/screwdriver/workspace";

/// Filesystem operations the workspace builder needs.
pub trait WorkspaceFs {
    /// Creates `path` and any missing parents. Must succeed when the
    /// directory already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// `WorkspaceFs` backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl WorkspaceFs for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            debug!("Workspace already exists: {}", path.display());
            return Ok(());
        }
        fs::create_dir_all(path)
    }
}

/// Derives checkout directories under a fixed workspace root.
///
/// Paths are logical identifiers joined with `/` on every platform:
/// `<root>/src/<org>/<repo>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(DEFAULT_WORKSPACE_ROOT)
    }
}

impl Workspace {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn path(&self, org: &str, repo: &str) -> String {
        format!("{}/src/{org}/{repo}", self.root)
    }

    /// Computes the workspace path for `org`/`repo` and makes sure the
    /// directory exists.
    ///
    /// Calling this again for the same pair is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::Workspace` carrying the attempted path when
    /// `org` or `repo` has a `.` or `..` component (it would escape
    /// `<root>/src`) or when the directory cannot be created.
    pub fn create(&self, fs: &impl WorkspaceFs, org: &str, repo: &str) -> Result<String, LaunchError> {
        let path = self.path(org, repo);

        let result = if has_relative_component(org) || has_relative_component(repo) {
            debug!("Refusing workspace outside root: {path}");
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "org and repo must not contain '.' or '..' components",
            ))
        } else {
            fs.create_dir_all(Path::new(&path))
        };

        result.map_err(|source| LaunchError::Workspace {
            path: path.clone(),
            source,
        })?;

        info!("Workspace ready at: {path}");
        Ok(path)
    }
}

fn has_relative_component(segment: &str) -> bool {
    segment.split('/').any(|part| part == "." || part == "..")
}
