// Service HTTP issu du template: `/` renvoie les métadonnées du projet, `/health` l'état du service.
// La sous-commande `render` substitue les placeholders {{PROJECT}}, {{ORG}}, {{ENV}} d'un fichier.
use clap::Parser;

mod cli;
mod common;
mod scaffold;
mod structures;
mod web;

use cli::{Cli, Command};
use common::logging::{self, LogOutput};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level.clone();

    match cli.into_command() {
        Command::Serve(args) => {
            logging::init(&log_level, LogOutput::Stdout)?;
            web::serve(&args).await?;
        }
        Command::Render(args) => {
            // stdout peut porter le rendu: les logs passent sur stderr
            logging::init(&log_level, LogOutput::Stderr)?;
            let config = args.config_source()?.resolve()?;
            scaffold::render_file(&args.input, args.output.as_deref(), &config).await?;
        }
    }

    Ok(())
}
