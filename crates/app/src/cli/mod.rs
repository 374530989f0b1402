use clap::{Parser, Subcommand};

mod db;
mod resets;
mod secret;
mod slug;

#[derive(Debug, Parser)]
#[command(name = "scoutline-app", about = "ScoutLine CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Resets(resets::ResetsCommand),
    Secret(secret::SecretCommand),
    Slug(slug::SlugCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Resets(command) => resets::run(command).await,
            Commands::Secret(command) => secret::run(&command),
            Commands::Slug(command) => slug::run(&command),
        }
    }
}
