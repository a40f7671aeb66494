use async_trait::async_trait;

use crate::error::Result;

use super::types::{Build, Job, Pipeline};

/// Lookups the launcher needs from the Screwdriver metadata API.
///
/// The resolution chain only talks to this trait, so tests can hand it a
/// plain struct instead of an HTTP client.
#[async_trait]
pub trait ScrewdriverApi {
    async fn build_from_id(&self, build_id: &str) -> Result<Build>;

    async fn job_from_id(&self, job_id: &str) -> Result<Job>;

    async fn pipeline_from_id(&self, pipeline_id: &str) -> Result<Pipeline>;
}
