use serde::{Deserialize, Serialize};

/// A single execution of a job.
///
/// Fields missing from an API response default to empty strings; the
/// resolution chain reports an empty identifier at the stage that uses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Build {
    pub id: String,
    /// Job this build was started for
    pub job_id: String,
}

/// A named build definition inside a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub id: String,
    pub pipeline_id: String,
}

/// Top-level CI configuration tied to one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pipeline {
    pub id: String,
    /// Compact source location, `host:org/repo#branch`
    pub scm_url: String,
}
