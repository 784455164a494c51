use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::config::Settings;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli)?;
    logging::init(&settings.log_file, settings.log_level)?;

    let ctx = HandlerContext::open(&settings, cli.format)?;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => handlers::browse::handle(&ctx),
        Commands::Keys { pattern } => handlers::keys::handle(&ctx, pattern),
        Commands::Get { key, raw } => handlers::get::handle(&ctx, &key, raw),
        Commands::Ttl { key } => handlers::ttl::handle(&ctx, &key),
        Commands::Expire { key, seconds } => handlers::expire::handle(&ctx, &key, seconds),
        Commands::Del { key } => handlers::del::handle(&ctx, &key),
        Commands::Seed => handlers::seed::handle(&ctx),
    }
}
