use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source-control location of a pipeline, decoded from its compact
/// `host:org/repo#branch` form.
///
/// `host` is kept opaque (it usually carries a `git@` user prefix) and `repo`
/// keeps any `.git` suffix, so `to_string()` reproduces the parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmLocation {
    pub host: String,
    pub org: String,
    pub repo: String,
    pub branch: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parsing SCM URL {url:?}: {reason}")]
pub struct ScmParseError {
    pub url: String,
    pub reason: &'static str,
}

impl ScmLocation {
    /// Parses `host:org/repo#branch`.
    ///
    /// Each separator splits on its first occurrence, so anything after the
    /// first `/` (including further slashes) belongs to `repo` and anything
    /// after the first `#` belongs to `branch`.
    ///
    /// # Errors
    ///
    /// Returns `ScmParseError` when a separator is missing or any of the four
    /// components is empty.
    pub fn parse(url: &str) -> Result<Self, ScmParseError> {
        let fail = |reason| ScmParseError {
            url: url.to_owned(),
            reason,
        };

        let (host, rest) = url.split_once(':').ok_or_else(|| fail("missing ':' after host"))?;
        let (path, branch) = rest
            .split_once('#')
            .ok_or_else(|| fail("missing '#' before branch"))?;
        let (org, repo) = path
            .split_once('/')
            .ok_or_else(|| fail("missing '/' between org and repo"))?;

        if host.is_empty() {
            return Err(fail("empty host"));
        }
        if org.is_empty() {
            return Err(fail("empty org"));
        }
        if repo.is_empty() {
            return Err(fail("empty repo"));
        }
        if branch.is_empty() {
            return Err(fail("empty branch"));
        }

        Ok(Self {
            host: host.to_owned(),
            org: org.to_owned(),
            repo: repo.to_owned(),
            branch: branch.to_owned(),
        })
    }

    /// Clone address without the branch, e.g. `git@github.com:org/repo.git`.
    pub fn checkout_url(&self) -> String {
        format!("{}:{}/{}", self.host, self.org, self.repo)
    }
}

impl FromStr for ScmLocation {
    type Err = ScmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScmLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}#{}", self.host, self.org, self.repo, self.branch)
    }
}
