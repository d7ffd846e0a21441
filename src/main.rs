use anyhow::Result;
use clap::Parser;
use recite::cli::{AppContext, Cli, Commands};
use recite::infra::{config, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Generate(args) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            recite::generate_run(args, &cfg, &ctx)
        }
        Commands::Stats(args) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            recite::stats_run(args, &cfg, &ctx)
        }
        Commands::Init(args) => config::init(args, &ctx),
        Commands::Completions(args) => recite::completion::run(args, &ctx),
    }
}
