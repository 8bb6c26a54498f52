pub mod init;
pub mod render;

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::common::logging::events;
use crate::structures::error::SResult;
use crate::structures::ScaffoldError;

pub use init::{from_repo_name, parse_init_command, InitConfig};
pub use render::render;

/// D'où provient la configuration d'initialisation.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    InitCommand(String),
    RepoName(String),
    Explicit(InitConfig),
}

impl ConfigSource {
    // Résout puis valide: toutes les erreurs de validation sont remontées d'un coup
    pub fn resolve(self) -> SResult<InitConfig> {
        let config = match self {
            ConfigSource::InitCommand(text) => {
                parse_init_command(&text).ok_or(ScaffoldError::InitCommand(text))?
            }
            ConfigSource::RepoName(name) => from_repo_name(&name).ok_or(ScaffoldError::RepoName(name))?,
            ConfigSource::Explicit(config) => config,
        };

        let issues = config.validate();
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(ScaffoldError::Invalid(issues))
        }
    }
}

/// Rend `input` avec `config` et écrit le résultat dans `output` (stdout si absent).
pub async fn render_file(input: &Path, output: Option<&Path>, config: &InitConfig) -> SResult<()> {
    info!(event = events::RENDER_START, input = %input.display(), config = ?config, msg = "Rendering template");

    let template = tokio::fs::read_to_string(input)
        .await
        .map_err(|source| ScaffoldError::Read { path: input.to_path_buf(), source })?;
    let rendered = render(&template, config);

    match output {
        Some(path) => tokio::fs::write(path, rendered.as_bytes())
            .await
            .map_err(|source| ScaffoldError::Write { path: path.to_path_buf(), source })?,
        None => {
            let mut stdout = tokio::io::stdout();
            let written = async {
                stdout.write_all(rendered.as_bytes()).await?;
                stdout.flush().await
            };
            written
                .await
                .map_err(|source| ScaffoldError::Write { path: PathBuf::from("<stdout>"), source })?;
        }
    }

    info!(event = events::RENDER_DONE, input = %input.display(), bytes = rendered.len(), msg = "Template rendered");
    Ok(())
}
