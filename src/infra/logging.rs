use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "RECITE_LOG";

/// Default directive for the global flags: `--quiet` wins over `--verbose`
pub fn default_directive(
    verbose: bool,
    quiet: bool,
) -> &'static str
{
    match (quiet, verbose)
    {
        (true, _) => "error",
        (false, true) => "info",
        (false, false) => "warn",
    }
}

/// Install a stderr fmt subscriber; `RECITE_LOG` overrides the flags
pub fn init(
    verbose: bool,
    quiet: bool,
)
{
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // Ignore a second init (tests may install their own subscriber)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
