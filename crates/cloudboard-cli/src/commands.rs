use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level, cli.no_color);

    let ctx = ExecutionContext::from_cli(&cli)?;

    match cli.command {
        Commands::Status(args) => handlers::status::handle(&ctx, &args),
        Commands::Costs(args) => handlers::costs::handle(&ctx, &args),
        Commands::View(args) => handlers::view::handle(&ctx, &args),
        Commands::Regions => handlers::regions::handle(&ctx),
        Commands::Months => handlers::months::handle(&ctx),
        Commands::Check => handlers::check::handle(&ctx),
        Commands::Watch(args) => handlers::watch::handle(&ctx, &args),
    }
}
