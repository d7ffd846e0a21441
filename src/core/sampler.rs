//! Rejection sampling of fixed-size passage sets under a speaking-rate band.
//!
//! Each attempt draws `count` distinct items uniformly at random, sums their
//! word counts and divides by the time budget. The first draw whose rate
//! falls inside the closed band `[target - tolerance, target + tolerance]` is
//! returned as drawn. Nothing is enumerated, so a feasible set can be missed
//! when very few subsets satisfy the band.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::core::filter::filter_pool;
use crate::core::passage::Weighted;

/// Retry bound used when the caller does not pick one
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000_000;

/// Half-width of the accepted band in words per minute
pub const DEFAULT_TOLERANCE: f64 = 7.5;

/// Closed interval of accepted rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand
{
    pub min: f64,
    pub max: f64,
}

impl RateBand
{
    pub fn around(
        target: f64,
        tolerance: f64,
    ) -> Self
    {
        Self { min: target - tolerance, max: target + tolerance }
    }

    /// Both bounds are inclusive
    pub fn contains(
        &self,
        rate: f64,
    ) -> bool
    {
        self.min <= rate && rate <= self.max
    }

    /// Total word counts that map onto this band for a time budget
    pub fn words(
        &self,
        total_minutes: f64,
    ) -> (f64, f64)
    {
        (self.min * total_minutes, self.max * total_minutes)
    }
}

/// Parameters of one selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest
{
    /// Number of passages to pick
    pub count: usize,

    /// Recitation time budget in minutes
    pub total_minutes: f64,

    /// Target speaking rate in words per minute
    pub target_rate: f64,

    /// Accepted deviation from `target_rate` either way
    pub tolerance: f64,

    /// Per-passage word limit applied before sampling
    pub word_limit: Option<u32>,

    /// Number of random draws before giving up
    pub max_attempts: usize,
}

impl SelectionRequest
{
    pub fn band(&self) -> RateBand
    {
        RateBand::around(self.target_rate, self.tolerance)
    }

    /// Reject parameters the sampler cannot work with
    pub fn validate(&self) -> Result<(), RequestError>
    {
        if self.count == 0
        {
            return Err(RequestError::ZeroCount);
        }
        if !(self.total_minutes.is_finite() && self.total_minutes > 0.0)
        {
            return Err(RequestError::NotPositive { name: "minutes", value: self.total_minutes });
        }
        if !(self.target_rate.is_finite() && self.target_rate > 0.0)
        {
            return Err(RequestError::NotPositive { name: "rate", value: self.target_rate });
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0)
        {
            return Err(RequestError::NegativeTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Malformed selection parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError
{
    #[error("passage count must be at least 1")]
    ZeroCount,

    #[error("{name} must be a positive number, got {value}")]
    NotPositive
    {
        name: &'static str,
        value: f64,
    },

    #[error("tolerance must be zero or more, got {0}")]
    NegativeTolerance(f64),
}

/// Why no selection was produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError
{
    /// Fewer candidates than requested; sampling never started
    #[error(
        "only {available} passages available but {required} are needed. Relax the word limit or lower the count."
    )]
    PoolTooSmall
    {
        available: usize,
        required: usize,
    },

    /// Every draw missed the rate band
    #[error(
        "maximum attempts reached ({attempts}). Please adjust parameters and try again."
    )]
    AttemptsExhausted
    {
        attempts: usize,
    },
}

/// An accepted set of items
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a, T>
{
    /// Items in the order they were drawn
    pub items: Vec<&'a T>,

    /// Positions of `items` in the pool the sampler drew from
    pub indices: Vec<usize>,

    pub total_words: u64,

    /// Words per minute of this set
    pub rate: f64,

    /// 1-based number of the attempt that was accepted
    pub attempts: usize,
}

/// Move `count` positions out of `indices` into `out`, uniformly at random.
///
/// Each draw removes the chosen position, so no position repeats and every
/// `count`-subset is equally likely. Stops early if `indices` runs dry.
pub fn draw_without_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    indices: &mut Vec<usize>,
    count: usize,
    out: &mut Vec<usize>,
)
{
    while !indices.is_empty() && out.len() < count
    {
        let i = rng.random_range(0..indices.len());
        out.push(indices.swap_remove(i));
    }
}

/// Pick `request.count` distinct items from `pool` whose rate lies in the band.
///
/// `request.word_limit` is not applied here; use [`choose`] for the
/// filter-then-sample pipeline.
#[instrument(level = "debug", skip_all, fields(pool = pool.len(), count = request.count))]
pub fn select_subset<'a, T, R>(
    pool: &'a [T],
    request: &SelectionRequest,
    rng: &mut R,
) -> Result<Selection<'a, T>, SelectionError>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let count = request.count;
    if pool.len() < count
    {
        return Err(SelectionError::PoolTooSmall { available: pool.len(), required: count });
    }

    let band = request.band();
    debug!(min = band.min, max = band.max, max_attempts = request.max_attempts, "sampling");

    let mut remaining = Vec::with_capacity(pool.len());
    let mut picked = Vec::with_capacity(count);

    for attempt in 1..=request.max_attempts
    {
        remaining.clear();
        remaining.extend(0..pool.len());
        picked.clear();

        draw_without_replacement(rng, &mut remaining, count, &mut picked);

        let total_words: u64 = picked
            .iter()
            .map(|&i| u64::from(pool[i].word_count()))
            .sum();
        let rate = total_words as f64 / request.total_minutes;

        if band.contains(rate)
        {
            info!(words = total_words, wpm = rate, attempts = attempt, "{count} passages chosen");
            return Ok(Selection {
                items: picked
                    .iter()
                    .map(|&i| &pool[i])
                    .collect(),
                indices: picked,
                total_words,
                rate,
                attempts: attempt,
            });
        }
    }

    warn!(attempts = request.max_attempts, "no draw landed in the rate band");
    Err(SelectionError::AttemptsExhausted { attempts: request.max_attempts })
}

/// Apply the word limit, then sample from what is left.
///
/// `indices` of the result refer to the filtered view, not to `pool`.
pub fn choose<'a, T, R>(
    pool: &'a [T],
    request: &SelectionRequest,
    rng: &mut R,
) -> Result<Selection<'a, T>, SelectionError>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let filtered = filter_pool(pool, request.word_limit);
    if let Some(limit) = request.word_limit
    {
        info!(
            "{} passages remaining after filtering those with greater than {limit} words",
            filtered.len()
        );
    }

    let picked = select_subset(&filtered, request, rng)?;
    Ok(Selection {
        items: picked
            .items
            .into_iter()
            .copied()
            .collect(),
        indices: picked.indices,
        total_words: picked.total_words,
        rate: picked.rate,
        attempts: picked.attempts,
    })
}
