use clap::{Args, Subcommand};
use scoutline_app::domain::slugs::{SlugAllocator, normalize};

#[derive(Debug, Args)]
pub(crate) struct SlugCommand {
    #[command(subcommand)]
    command: SlugSubcommand,
}

#[derive(Debug, Subcommand)]
enum SlugSubcommand {
    /// Show the slug base and first candidates for a display name
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PreviewArgs {
    /// Display name to derive a slug from
    #[arg(long)]
    name: String,

    /// Number of candidates to list
    #[arg(long, default_value_t = 3)]
    candidates: u32,
}

pub(crate) fn run(command: &SlugCommand) -> Result<(), String> {
    match &command.command {
        SlugSubcommand::Preview(args) => {
            let base = normalize(&args.name);
            let allocator = SlugAllocator::default();

            println!("base: {base}");

            for attempt in 1..=args.candidates {
                println!("candidate {attempt}: {}", allocator.candidate(&base, attempt));
            }

            Ok(())
        }
    }
}
