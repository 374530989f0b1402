use clap::{Args, Subcommand};
use scoutline_app::domain::tokens::SigningSecret;

#[derive(Debug, Args)]
pub(crate) struct SecretCommand {
    #[command(subcommand)]
    command: SecretSubcommand,
}

#[derive(Debug, Subcommand)]
enum SecretSubcommand {
    /// Print a random value suitable for TOKEN_SIGNING_SECRET
    Generate,
}

pub(crate) fn run(command: &SecretCommand) -> Result<(), String> {
    match command.command {
        SecretSubcommand::Generate => {
            println!("{}", SigningSecret::generate_encoded());

            Ok(())
        }
    }
}
