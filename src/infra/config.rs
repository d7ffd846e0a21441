use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::sampler::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TOLERANCE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config
{
    /// Where pool files live
    pub pool: PoolConfig,

    /// Default selection settings
    pub selection: SelectionConfig,

    /// Category used when none is given on the command line
    pub defaults: DefaultsConfig,

    /// Per-division speech rate and word limit
    pub divisions: BTreeMap<String, DivisionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig
{
    /// Root directory; `~` and `$VAR` are expanded
    pub dir: String,
    pub year: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig
{
    pub count: usize,
    pub minutes: f64,
    pub tolerance: f64,
    pub max_attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig
{
    pub division: String,
    pub translation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivisionConfig
{
    /// Target words per minute
    pub speech_rate: f64,

    /// Longest passage allowed, in words
    pub word_limit: Option<u32>,
}

impl Default for Config
{
    fn default() -> Self
    {
        let divisions = [("senior", 140.0, 170), ("junior", 130.0, 160), ("primary", 115.0, 120)]
            .into_iter()
            .map(|(name, speech_rate, limit)| {
                (name.to_string(), DivisionConfig { speech_rate, word_limit: Some(limit) })
            })
            .collect();

        Self {
            pool: PoolConfig { dir: "passages".to_string(), year: 2024 },
            selection: SelectionConfig {
                count: 12,
                minutes: 8.0,
                tolerance: DEFAULT_TOLERANCE,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
            },
            defaults: DefaultsConfig {
                division: "senior".to_string(),
                translation: "nkjv".to_string(),
            },
            divisions,
        }
    }
}

impl Config
{
    /// Settings for a division, case-insensitive
    pub fn division(
        &self,
        name: &str,
    ) -> Option<&DivisionConfig>
    {
        self.divisions
            .get(&name.to_lowercase())
    }

    /// Pool root with `~` and environment variables expanded
    pub fn pool_dir(&self) -> Result<PathBuf>
    {
        let expanded = shellexpand::full(&self.pool.dir)
            .with_context(|| format!("Failed to expand pool dir {}", self.pool.dir))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

const CONFIG_FILES: [&str; 4] = ["recite.toml", "recite.yaml", "recite.json", ".recite.toml"];

/// Layer defaults, the first config file found (or `explicit`), and
/// `RECITE__*` environment variables.
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let defaults = config::Config::try_from(&Config::default())
        .context("Failed to build default configuration")?;
    let mut builder = config::Config::builder().add_source(defaults);

    match explicit
    {
        Some(path) =>
        {
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            if let Some(path) = CONFIG_FILES
                .iter()
                .find(|p| Path::new(p).exists())
            {
                builder = builder.add_source(config::File::with_name(path));
            }
        }
    }

    // RECITE__SELECTION__MAX_ATTEMPTS=500 -> selection.max_attempts
    builder = builder.add_source(
        config::Environment::with_prefix("RECITE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("recite.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("DRY RUN: Would write {}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use assert_fs::prelude::*;

    use super::*;

    #[test]
    fn defaults_match_division_table()
    {
        let cfg = Config::default();
        let senior = cfg.division("Senior").unwrap();
        assert_eq!(senior.speech_rate, 140.0);
        assert_eq!(senior.word_limit, Some(170));
        assert_eq!(cfg.division("primary").unwrap().word_limit, Some(120));
        assert!(cfg.division("adult").is_none());
        assert_eq!(cfg.selection.count, 12);
        assert_eq!(cfg.selection.minutes, 8.0);
    }

    #[test]
    fn default_config_survives_toml()
    {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn explicit_file_overrides_defaults()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("custom.toml");
        file.write_str("[selection]\ncount = 6\n\n[divisions.junior]\nspeech_rate = 125.0\n")
            .unwrap();

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.selection.count, 6);
        assert_eq!(cfg.selection.minutes, 8.0);
        assert_eq!(cfg.division("junior").unwrap().speech_rate, 125.0);
        assert_eq!(cfg.division("junior").unwrap().word_limit, Some(160));
    }

    #[test]
    fn init_refuses_to_overwrite()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("recite.toml")
            .write_str("")
            .unwrap();
        let ctx = AppContext { quiet: true, no_color: true, dry_run: false };

        let err = init(InitArgs { path: tmp.path().to_path_buf(), force: false }, &ctx).unwrap_err();
        assert!(err.to_string().contains("--force"));

        init(InitArgs { path: tmp.path().to_path_buf(), force: true }, &ctx).unwrap();
        let written = std::fs::read_to_string(tmp.child("recite.toml").path()).unwrap();
        assert!(written.contains("[selection]"));
    }
}
