//! Word-limit filtering applied to a pool before sampling.

use crate::core::passage::Weighted;

/// Keep items whose word count is within `word_limit`, preserving order.
///
/// `None` keeps everything. An empty result is not an error; the sampler
/// reports it as a pool that is too small.
pub fn filter_pool<T: Weighted>(
    pool: &[T],
    word_limit: Option<u32>,
) -> Vec<&T>
{
    match word_limit
    {
        Some(limit) => pool
            .iter()
            .filter(|item| item.word_count() <= limit)
            .collect(),
        None => pool
            .iter()
            .collect(),
    }
}
