use thiserror::Error;

use crate::scm::ScmParseError;

/// Failures reported by a metadata API collaborator.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("JSON deserialization error")]
    Json(#[from] serde_json::Error),
}

/// Stage-tagged failures of the build resolution chain.
///
/// Every variant names the stage that failed and the identifier it was
/// working on; the underlying cause stays reachable through `source()`.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("fetching build ID {id:?}")]
    BuildFetch {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("fetching Job ID {id:?}")]
    JobFetch {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("fetching Pipeline ID {id:?}")]
    PipelineFetch {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    ScmParse(#[from] ScmParseError),

    #[error("creating workspace {path:?}")]
    Workspace {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ApiError>;
