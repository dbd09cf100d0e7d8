// feedforge/src/main.rs

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};
use commands::validate::ValidateArgs;

fn main() -> miette::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug feedforge transform ... to see the details
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    tracing::debug!(config = ?config, "CLI parsed");

    let result = match cli.command {
        Commands::Transform {
            input,
            format,
            output,
            encoding,
            no_compress,
        } => commands::transform::execute(config, input, format, output, encoding, no_compress),

        Commands::Validate {
            feed,
            format,
            schema,
            json,
            verbose,
            output,
            check,
        } => commands::validate::execute(ValidateArgs {
            feed,
            format,
            schema,
            json,
            verbose,
            output,
            check,
        }),

        Commands::Preview {
            input,
            format,
            id,
            row,
        } => commands::preview::execute(config, input, format, id, row),

        Commands::Feeds { dir } => commands::feeds::execute(config, dir),

        Commands::Schema { format, yaml } => commands::schema::execute(format, yaml),
    };

    result.map_err(|e| miette::miette!("{:#}", e))
}
