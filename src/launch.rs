use log::info;
use serde::{Deserialize, Serialize};

use crate::error::LaunchError;
use crate::scm::ScmLocation;
use crate::screwdriver::ScrewdriverApi;
use crate::workspace::{Workspace, WorkspaceFs};

/// Everything the step executor needs to check out and run a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    pub build_id: String,
    pub workspace: String,
    pub scm: ScmLocation,
}

/// Resolves `build_id` to its source location and prepares the workspace.
///
/// Walks Build → Job → Pipeline through `api`, parses the pipeline's SCM URL
/// and creates `<root>/src/<org>/<repo>`. Stages run strictly in order and
/// the first failure aborts the chain; nothing after it is called.
///
/// # Errors
///
/// Returns the `LaunchError` variant of the stage that failed, carrying the
/// identifier that stage was given.
pub async fn resolve<A, F>(
    api: &A,
    fs: &F,
    workspace: &Workspace,
    build_id: &str,
) -> Result<Launch, LaunchError>
where
    A: ScrewdriverApi + ?Sized,
    F: WorkspaceFs,
{
    info!("Fetching build {build_id}");
    let build = api
        .build_from_id(build_id)
        .await
        .map_err(|source| LaunchError::BuildFetch {
            id: build_id.to_owned(),
            source,
        })?;

    info!("Fetching job {}", build.job_id);
    let job = api
        .job_from_id(&build.job_id)
        .await
        .map_err(|source| LaunchError::JobFetch {
            id: build.job_id.clone(),
            source,
        })?;

    info!("Fetching pipeline {}", job.pipeline_id);
    let pipeline = api
        .pipeline_from_id(&job.pipeline_id)
        .await
        .map_err(|source| LaunchError::PipelineFetch {
            id: job.pipeline_id.clone(),
            source,
        })?;

    let scm = ScmLocation::parse(&pipeline.scm_url)?;
    info!("Resolved SCM location: {scm}");

    let workspace = workspace.create(fs, &scm.org, &scm.repo)?;

    Ok(Launch {
        build_id: build_id.to_owned(),
        workspace,
        scm,
    })
}
