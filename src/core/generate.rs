//! `recite generate`: resolve parameters, load the pool, pick and print a set.

use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::cli::{AppContext, GenerateArgs, PoolArgs};
use crate::core::pool::{DirPoolSource, PoolKey, PoolSource};
use crate::core::render::{CardStyle, SelectionReport, render_cards, render_summary};
use crate::core::sampler::{SelectionRequest, choose};
use crate::infra::config::Config;

/// Pool source for the directory and year from flags or config
pub fn pool_source(
    args: &PoolArgs,
    config: &Config,
) -> Result<DirPoolSource> {
    let root = match &args.pool_dir {
        Some(dir) => dir.clone(),
        None => config.pool_dir()?,
    };
    Ok(DirPoolSource::new(root, args.year.unwrap_or(config.pool.year)))
}

/// Merge command-line overrides over config and division defaults
pub fn resolve_request(
    args: &GenerateArgs,
    config: &Config,
) -> Result<(PoolKey, SelectionRequest)> {
    let division = args
        .division
        .clone()
        .unwrap_or_else(|| config.defaults.division.clone());
    let translation = args
        .pool
        .translation
        .clone()
        .unwrap_or_else(|| config.defaults.translation.clone());
    let preset = config.division(&division);

    let target_rate = match (args.rate, preset) {
        (Some(rate), _) => rate,
        (None, Some(p)) => p.speech_rate,
        (None, None) => bail!(
            "Unknown division '{division}'. Pass --rate or add [divisions.{}] to the config.",
            division.to_lowercase()
        ),
    };

    let word_limit = if args.no_word_limit {
        None
    } else {
        args.word_limit
            .or_else(|| preset.and_then(|p| p.word_limit))
    };

    let request = SelectionRequest {
        count: args
            .count
            .unwrap_or(config.selection.count),
        total_minutes: args
            .minutes
            .unwrap_or(config.selection.minutes),
        target_rate,
        tolerance: args
            .tolerance
            .unwrap_or(config.selection.tolerance),
        word_limit,
        max_attempts: args
            .max_attempts
            .unwrap_or(config.selection.max_attempts),
    };
    request
        .validate()
        .context("Invalid selection parameters")?;

    Ok((PoolKey::new(division, translation), request))
}

#[instrument(skip_all)]
pub fn run(args: GenerateArgs, config: &Config, ctx: &AppContext) -> Result<()> {
    let (key, request) = resolve_request(&args, config)?;
    let source = pool_source(&args.pool, config)?;

    if ctx.dry_run {
        if !ctx.quiet {
            let band = request.band();
            println!("{}", "DRY RUN: Would select:".yellow());
            println!("  Pool: {}", source.path_for(&key).display());
            println!("  Count: {}", request.count);
            println!("  Minutes: {}", request.total_minutes);
            println!("  Rate band: {} - {} wpm", band.min, band.max);
            println!("  Word limit: {:?}", request.word_limit);
            println!("  Max attempts: {}", request.max_attempts);
        }
        return Ok(());
    }

    let seed = args
        .seed
        .unwrap_or_else(|| rand::rng().random());
    info!(seed, %key, "selecting passages");
    let mut rng = StdRng::seed_from_u64(seed);

    let pool = source.fetch(&key)?;
    let selection = choose(pool.as_slice(), &request, &mut rng)
        .with_context(|| format!("No passage set found for {key}"))?;

    if args.json {
        let report = SelectionReport::new(&key, seed, request.band(), &selection);
        println!("{}", serde_json::to_string(&report).context("Failed to encode selection")?);
        return Ok(());
    }

    let style = CardStyle {
        hide_verse_numbers: args.hide_verse_numbers,
        hide_text: args.hide_text,
        color: !ctx.no_color && std::io::stdout().is_terminal(),
    };
    print!("{}", render_cards(&selection.items, style));

    if !ctx.quiet {
        let summary = format!("{} (seed {seed})", render_summary(&selection));
        if style.color {
            println!("{}", summary.green());
        } else {
            println!("{summary}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["recite", "generate"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Generate(args) => args,
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn division_presets_fill_rate_and_limit() {
        let (key, req) = resolve_request(&generate_args(&["-d", "Junior"]), &Config::default()).unwrap();
        assert_eq!(key, PoolKey::new("Junior", "nkjv"));
        assert_eq!(req.target_rate, 130.0);
        assert_eq!(req.word_limit, Some(160));
        assert_eq!(req.count, 12);
        assert_eq!(req.total_minutes, 8.0);
        assert_eq!(req.tolerance, 7.5);
    }

    #[test]
    fn flags_override_presets() {
        let args = generate_args(&["-n", "6", "--rate", "150", "--word-limit", "90", "--minutes", "4"]);
        let (key, req) = resolve_request(&args, &Config::default()).unwrap();
        assert_eq!(key.division, "senior");
        assert_eq!(req.count, 6);
        assert_eq!(req.target_rate, 150.0);
        assert_eq!(req.word_limit, Some(90));
        assert_eq!(req.total_minutes, 4.0);
    }

    #[test]
    fn no_word_limit_clears_preset() {
        let (_, req) = resolve_request(&generate_args(&["--no-word-limit"]), &Config::default()).unwrap();
        assert_eq!(req.word_limit, None);
    }

    #[test]
    fn unknown_division_needs_rate() {
        let err = resolve_request(&generate_args(&["-d", "adult"]), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--rate"));

        let (_, req) = resolve_request(&generate_args(&["-d", "adult", "--rate", "120"]), &Config::default()).unwrap();
        assert_eq!(req.word_limit, None);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let err = resolve_request(&generate_args(&["--minutes", "0"]), &Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("minutes must be a positive number"));
    }
}
