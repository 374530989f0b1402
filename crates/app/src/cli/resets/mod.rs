use clap::{Args, Subcommand};

mod prune;

#[derive(Debug, Args)]
pub(crate) struct ResetsCommand {
    #[command(subcommand)]
    command: ResetsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ResetsSubcommand {
    /// Delete password reset records that have expired
    Prune(prune::PruneArgs),
}

pub(crate) async fn run(command: ResetsCommand) -> Result<(), String> {
    match command.command {
        ResetsSubcommand::Prune(args) => prune::run(args).await,
    }
}
