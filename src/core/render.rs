//! Terminal and JSON output for selected passages.

use std::fmt::Write as _;
use std::sync::LazyLock;

use owo_colors::OwoColorize;
use regex::Regex;
use serde::Serialize;

use crate::core::passage::Passage;
use crate::core::pool::PoolKey;
use crate::core::sampler::{RateBand, Selection};

static VERSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d+\)$").expect("verse marker pattern"));

/// Display toggles for printed cards
#[derive(Debug, Clone, Copy, Default)]
pub struct CardStyle
{
    /// Drop `(N)` verse markers from the text
    pub hide_verse_numbers: bool,

    /// Print only the card headers
    pub hide_text: bool,

    pub color: bool,
}

/// Passage text with verse markers optionally removed
pub fn card_text(
    passage: &Passage,
    hide_verse_numbers: bool,
) -> String
{
    let text = passage.text();
    if !hide_verse_numbers
    {
        return text;
    }

    text.split_whitespace()
        .filter(|word| !VERSE_NUMBER.is_match(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbered cards in draw order
pub fn render_cards(
    passages: &[&Passage],
    style: CardStyle,
) -> String
{
    let mut out = String::new();

    for (i, p) in passages
        .iter()
        .enumerate()
    {
        let number = format!("{}.", i + 1);
        let tag = format!("{} • {}", p.division, p.passage_number);
        let stats = format!("{} / {} / {}", p.cards.len(), p.verse_count, p.word_count);
        let source = format!("{} • {}", p.translation, p.release);

        if style.color
        {
            let _ = writeln!(out, "{} {}  {}", number.bold(), tag.cyan(), p.reference.bold());
            let _ = writeln!(out, "    {}  {}", stats.dimmed(), source.dimmed());
        }
        else
        {
            let _ = writeln!(out, "{number} {tag}  {}", p.reference);
            let _ = writeln!(out, "    {stats}  {source}");
        }

        if !style.hide_text
        {
            let _ = writeln!(out, "    {}", card_text(p, style.hide_verse_numbers));
        }
        out.push('\n');
    }

    out
}

/// One-line outcome of a selection
pub fn render_summary<T>(selection: &Selection<'_, T>) -> String
{
    format!(
        "{} passages chosen: words = {}, wpm = {:.1}",
        selection
            .items
            .len(),
        selection.total_words,
        selection.rate
    )
}

/// Machine-readable result of `recite generate --json`
#[derive(Debug, Serialize)]
pub struct SelectionReport<'a>
{
    pub division: &'a str,
    pub translation: &'a str,
    pub seed: u64,
    pub attempts: usize,
    pub total_words: u64,
    pub rate: f64,
    pub band: RateBand,
    pub passages: &'a [&'a Passage],
}

impl<'a> SelectionReport<'a>
{
    pub fn new(
        key: &'a PoolKey,
        seed: u64,
        band: RateBand,
        selection: &'a Selection<'a, Passage>,
    ) -> Self
    {
        Self {
            division: &key.division,
            translation: &key.translation,
            seed,
            attempts: selection.attempts,
            total_words: selection.total_words,
            rate: selection.rate,
            band,
            passages: &selection.items,
        }
    }
}
