use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::auth::Token;
use crate::config::Config;
use crate::launch::{self, Launch};
use crate::output;
use crate::screwdriver::ScrewdriverClient;
use crate::workspace::{LocalFs, Workspace};

#[derive(Parser, Debug)]
#[command(name = "launcher")]
#[command(author, version, about = "Screwdriver build launcher", long_about = None)]
pub struct Cli {
    /// ID of the build to launch
    build_id: String,

    /// Screwdriver API token
    #[arg(short, long, env = "SD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Screwdriver API base URL
    #[arg(short = 'u', long, env = "SD_API_URL")]
    api_url: Option<String>,

    /// Directory under which workspaces are created
    #[arg(short, long)]
    workspace_root: Option<String>,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the resolved launch to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    pretty: bool,
}

impl Cli {
    /// Merges command-line overrides into the loaded configuration.
    fn settings(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(url) = &self.api_url {
            config.api.base_url.clone_from(url);
        }
        if let Some(token) = &self.token {
            config.api.token = Some(token.clone());
        }
        if let Some(root) = &self.workspace_root {
            config.workspace.root.clone_from(root);
        }

        Ok(config)
    }

    fn write_launch(&self, launch: &Launch) -> Result<()> {
        let json_output = if self.pretty {
            serde_json::to_string_pretty(launch)?
        } else {
            serde_json::to_string(launch)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Launch written to: {}", output_path.display());
        } else {
            println!("{}", json_output);
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = self.settings()?;
        info!("Launching build {} via {}", self.build_id, config.api.base_url);

        let token = config.api.token.clone().map(Token::from);
        let client = ScrewdriverClient::new(&config.api.base_url, token)?;
        let workspace = Workspace::new(&config.workspace.root);
        debug!(
            "Using API at {} with workspace root {}",
            client.api_url(),
            workspace.root()
        );

        let launch = launch::resolve(&client, &LocalFs, &workspace, &self.build_id).await?;

        output::print_summary(&launch);
        self.write_launch(&launch)
    }

    /// Runs the launch and reports any failure once, with its cause chain.
    pub async fn run(&self) -> ExitCode {
        match self.execute().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                output::print_failure(&err);
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    fn empty_config(dir: &Path) -> PathBuf {
        let path = dir.join("launcher.toml");
        std::fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("launcher.toml");
        std::fs::write(
            &config_path,
            r#"
[api]
base-url = "https://sd.from-file.com"
token = "file-token"

[workspace]
root = "/from/file"
"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "launcher",
            "--config",
            config_path.to_str().unwrap(),
            "--api-url",
            "https://sd.from-flag.com",
            "--workspace-root",
            "/from/flag",
            "1234",
        ]);
        let config = cli.settings().unwrap();

        assert_eq!(cli.build_id, "1234");
        assert_eq!(config.api.base_url, "https://sd.from-flag.com");
        assert_eq!(config.workspace.root, "/from/flag");
        assert_eq!(config.api.token.as_deref(), Some("file-token"));
    }

    #[tokio::test]
    async fn test_execute_writes_launch_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v3/builds/1234")
            .with_body(r#"{"id": "1234", "jobId": "5678"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v3/jobs/5678")
            .with_body(r#"{"id": "5678", "pipelineId": "90"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v3/pipelines/90")
            .with_body(r#"{"id": "90", "scmUrl": "git@github.com:screwdriver-cd/launcher.git#master"}"#)
            .create_async()
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("workspace");
        let output_path = temp_dir.path().join("launch.json");
        let server_url = server.url();

        let cli = Cli::parse_from([
            "launcher",
            "--config",
            empty_config(temp_dir.path()).to_str().unwrap(),
            "--api-url",
            server_url.as_str(),
            "--workspace-root",
            root.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
            "1234",
        ]);
        cli.execute().await.unwrap();

        let launch: Launch =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(launch.scm.repo, "launcher.git");
        assert!(root.join("src/screwdriver-cd/launcher.git").is_dir());
    }

    #[tokio::test]
    async fn test_execute_reports_stage_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v3/builds/shoulderror")
            .with_status(404)
            .create_async()
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "launcher",
            "--config",
            empty_config(temp_dir.path()).to_str().unwrap(),
            "--api-url",
            server.url().as_str(),
            "--workspace-root",
            temp_dir.path().to_str().unwrap(),
            "shoulderror",
        ]);

        let err = cli.execute().await.unwrap_err();
        assert!(err.to_string().contains(r#"fetching build ID "shoulderror""#));
    }

    #[tokio::test]
    async fn test_run_fails_with_exit_code() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v3/builds/shoulderror")
            .with_status(500)
            .create_async()
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "launcher",
            "--config",
            empty_config(temp_dir.path()).to_str().unwrap(),
            "--api-url",
            server.url().as_str(),
            "--workspace-root",
            temp_dir.path().to_str().unwrap(),
            "shoulderror",
        ]);

        assert_eq!(cli.run().await, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn test_missing_config_file_stops_launch() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("lanucher.toml");
        let cli = Cli::parse_from([
            "launcher",
            "--config",
            missing.to_str().unwrap(),
            "1234",
        ]);

        let err = cli.execute().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
