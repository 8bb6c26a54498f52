use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::scaffold::{ConfigSource, InitConfig};
use crate::scaffold::init::DEFAULT_REGION;
use crate::structures::error::SResult;
use crate::structures::ScaffoldError;

pub const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(name = "project-template", version, about = "Project template service and scaffolding tool")]
pub struct Cli {
    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `/` and `/health` over HTTP (default)
    Serve(ServeArgs),
    /// Substitute {{PROJECT}}, {{ORG}} and {{ENV}} in a template file
    Render(RenderArgs),
}

#[derive(Debug, Clone, Args, PartialEq, Eq)]
pub struct ServeArgs {
    #[arg(long, default_value_t = DEFAULT_ADDRESS)]
    pub address: IpAddr,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self { address: DEFAULT_ADDRESS, port: DEFAULT_PORT }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Template file to render
    pub input: PathBuf,

    /// Destination file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Full `/init org=.. env=.. project=.. stack=..` command
    #[arg(long, conflicts_with_all = ["repo_name", "org", "env", "project", "stack", "region"])]
    pub init: Option<String>,

    /// Repository name `<org>-<env>-<project>-<stack>`
    #[arg(long, conflicts_with_all = ["org", "env", "project", "stack", "region"])]
    pub repo_name: Option<String>,

    #[arg(long)]
    pub org: Option<String>,

    #[arg(long)]
    pub env: Option<String>,

    #[arg(long)]
    pub project: Option<String>,

    #[arg(long, alias = "techstack")]
    pub stack: Option<String>,

    #[arg(long)]
    pub region: Option<String>,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command.unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}

impl RenderArgs {
    pub fn config_source(&self) -> SResult<ConfigSource> {
        if let Some(text) = &self.init {
            return Ok(ConfigSource::InitCommand(text.clone()));
        }
        if let Some(name) = &self.repo_name {
            return Ok(ConfigSource::RepoName(name.clone()));
        }

        let field = |value: &Option<String>, name: &'static str| {
            value.clone().ok_or(ScaffoldError::MissingField(name))
        };
        Ok(ConfigSource::Explicit(InitConfig {
            org: field(&self.org, "org")?,
            env: field(&self.env, "env")?,
            project: field(&self.project, "project")?,
            techstack: field(&self.stack, "stack")?,
            region: self.region.clone().unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_serves_on_8080() {
        let cli = Cli::try_parse_from(["project-template"]).unwrap();
        assert_eq!(cli.log_level, "info");
        match cli.into_command() {
            Command::Serve(args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_flags_override_defaults() {
        let cli = Cli::try_parse_from(["project-template", "serve", "--address", "127.0.0.1", "--port", "9090"]).unwrap();
        match cli.into_command() {
            Command::Serve(args) => {
                assert_eq!(args.port, 9090);
                assert_eq!(args.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn render_with_explicit_fields() {
        let cli = Cli::try_parse_from([
            "project-template", "render", "main.go",
            "--org", "nl", "--env", "dev", "--project", "myapi", "--techstack", "go",
        ]).unwrap();
        let Command::Render(args) = cli.into_command() else { panic!("expected render") };
        match args.config_source().unwrap() {
            ConfigSource::Explicit(cfg) => {
                assert_eq!(cfg.techstack, "go");
                assert_eq!(cfg.region, "euw");
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn render_missing_field_is_reported() {
        let cli = Cli::try_parse_from(["project-template", "render", "in.txt", "--org", "nl"]).unwrap();
        let Command::Render(args) = cli.into_command() else { panic!("expected render") };
        assert!(matches!(args.config_source(), Err(ScaffoldError::MissingField("env"))));
    }

    #[test]
    fn init_conflicts_with_explicit_fields() {
        let res = Cli::try_parse_from([
            "project-template", "render", "in.txt", "--init", "/init org=nl", "--org", "nl",
        ]);
        assert!(res.is_err());
    }
}
