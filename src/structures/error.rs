use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}:{port}: {source}")]
    Bind {
        address: IpAddr,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("server launch failed: {0}")]
    Launch(String),

    #[error("metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Invalid org \"{value}\". Valid: {valid}")]
    Org { value: String, valid: String },

    #[error("Invalid env \"{value}\". Valid: {valid}")]
    Env { value: String, valid: String },

    #[error("Invalid stack \"{value}\". Valid: {valid}")]
    Stack { value: String, valid: String },

    #[error("Invalid region \"{value}\". Valid: {valid}")]
    Region { value: String, valid: String },

    #[error("Invalid project name \"{0}\". Must be 2-20 lowercase alphanumeric characters.")]
    Project(String),
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error("not a valid /init command: {0}")]
    InitCommand(String),

    #[error("repository name {0:?} does not follow <org>-<env>-<project>-<stack>")]
    RepoName(String),

    #[error("missing --{0} (or use --init / --repo-name)")]
    MissingField(&'static str),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("- {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type SResult<T> = Result<T, ScaffoldError>;
