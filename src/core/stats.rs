//! `recite stats`: how big each pool is and how long its passages are.

use anyhow::{Context, Result};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

use crate::cli::{AppContext, StatsArgs};
use crate::core::filter::filter_pool;
use crate::core::generate::pool_source;
use crate::core::passage::Passage;
use crate::core::pool::{PoolKey, PoolSource};
use crate::core::sampler::RateBand;
use crate::infra::config::Config;

/// Word-count summary of one pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStats
{
    pub passages: usize,
    pub within_limit: usize,
    pub word_limit: Option<u32>,
    pub min_words: Option<u32>,
    pub max_words: Option<u32>,
    pub mean_words: Option<f64>,
}

impl PoolStats
{
    /// Min/max/mean are taken over the passages that pass `word_limit`
    pub fn compute(
        pool: &[Passage],
        word_limit: Option<u32>,
    ) -> Self
    {
        let kept = filter_pool(pool, word_limit);
        let (min_words, max_words) = match kept
            .iter()
            .map(|p| p.word_count)
            .minmax()
        {
            MinMaxResult::NoElements => (None, None),
            MinMaxResult::OneElement(w) => (Some(w), Some(w)),
            MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
        };
        let mean_words = (!kept.is_empty()).then(|| {
            kept.iter()
                .map(|p| f64::from(p.word_count))
                .sum::<f64>()
                / kept.len() as f64
        });

        Self {
            passages: pool.len(),
            within_limit: kept.len(),
            word_limit,
            min_words,
            max_words,
            mean_words,
        }
    }
}

#[derive(Debug, Serialize)]
struct DivisionReport
{
    key: String,
    speech_rate: Option<f64>,
    /// Total words a full set must land in
    band_words: Option<(f64, f64)>,
    #[serde(flatten)]
    stats: PoolStats,
}

#[derive(Tabled)]
struct StatsRow
{
    #[tabled(rename = "Pool")]
    key: String,
    #[tabled(rename = "Passages")]
    passages: usize,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Kept")]
    kept: usize,
    #[tabled(rename = "Words min/mean/max")]
    words: String,
    #[tabled(rename = "Set words")]
    band: String,
}

fn dash<T: ToString>(v: Option<T>) -> String
{
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl From<&DivisionReport> for StatsRow
{
    fn from(r: &DivisionReport) -> Self
    {
        let s = &r.stats;
        Self {
            key: r.key.clone(),
            passages: s.passages,
            limit: dash(s.word_limit),
            kept: s.within_limit,
            words: format!(
                "{} / {} / {}",
                dash(s.min_words),
                dash(s.mean_words.map(|m| format!("{m:.1}"))),
                dash(s.max_words)
            ),
            band: dash(
                r.band_words
                    .map(|(lo, hi)| format!("{lo:.0} - {hi:.0}")),
            ),
        }
    }
}

pub fn run(
    args: StatsArgs,
    config: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let source = pool_source(&args.pool, config)?;
    let translation = args
        .pool
        .translation
        .clone()
        .unwrap_or_else(|| config.defaults.translation.clone());

    let implicit = args.divisions.is_empty();
    let divisions: Vec<String> = if implicit
    {
        config
            .divisions
            .keys()
            .cloned()
            .collect()
    }
    else
    {
        args.divisions
    };

    let mut reports = Vec::new();
    for division in divisions
    {
        let key = PoolKey::new(division.as_str(), translation.as_str());
        let pool = match source.fetch(&key)
        {
            Ok(pool) => pool,
            Err(err) if implicit =>
            {
                warn!(%key, "skipping pool: {err:#}");
                continue;
            }
            Err(err) => return Err(err),
        };

        let preset = config.division(&division);
        let speech_rate = preset.map(|p| p.speech_rate);
        let band_words = speech_rate.map(|rate| {
            RateBand::around(rate, config.selection.tolerance).words(config.selection.minutes)
        });

        reports.push(DivisionReport {
            key: key.to_string(),
            speech_rate,
            band_words,
            stats: PoolStats::compute(&pool, preset.and_then(|p| p.word_limit)),
        });
    }

    if args.json
    {
        println!("{}", serde_json::to_string(&reports).context("Failed to encode stats")?);
        return Ok(());
    }

    if reports.is_empty()
    {
        if !ctx.quiet
        {
            println!("No pools found under {}", source.root().display());
        }
        return Ok(());
    }

    let rows: Vec<StatsRow> = reports
        .iter()
        .map(StatsRow::from)
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn pool(words: &[u32]) -> Vec<Passage>
    {
        words
            .iter()
            .map(|&w| {
                serde_json::from_value(serde_json::json!({ "word_count": w })).unwrap()
            })
            .collect()
    }

    #[test]
    fn stats_follow_the_limit()
    {
        let stats = PoolStats::compute(&pool(&[100, 180, 60, 170]), Some(170));
        assert_eq!(stats.passages, 4);
        assert_eq!(stats.within_limit, 3);
        assert_eq!(stats.min_words, Some(60));
        assert_eq!(stats.max_words, Some(170));
        assert_eq!(stats.mean_words, Some(110.0));
    }

    #[test]
    fn empty_after_filter_has_no_word_stats()
    {
        let stats = PoolStats::compute(&pool(&[300]), Some(10));
        assert_eq!(stats.within_limit, 0);
        assert_eq!(stats.min_words, None);
        assert_eq!(stats.mean_words, None);
    }

    #[test]
    fn single_passage_is_both_min_and_max()
    {
        let stats = PoolStats::compute(&pool(&[42]), None);
        assert_eq!((stats.min_words, stats.max_words), (Some(42), Some(42)));
    }
}
