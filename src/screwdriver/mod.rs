mod api;
mod client;
mod types;

pub use api::ScrewdriverApi;
pub use client::ScrewdriverClient;
pub use types::{Build, Job, Pipeline};
