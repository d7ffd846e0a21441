use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything the selector can weigh by word count
pub trait Weighted
{
    fn word_count(&self) -> u32;
}

impl Weighted for u32
{
    fn word_count(&self) -> u32
    {
        *self
    }
}

impl<T: Weighted + ?Sized> Weighted for &T
{
    fn word_count(&self) -> u32
    {
        (**self).word_count()
    }
}

/// One selectable passage as published in a pool file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage
{
    /// Division the passage belongs to (e.g., "Senior")
    #[serde(default)]
    pub division: String,

    /// Number of the passage within its division
    #[serde(default)]
    pub passage_number: u32,

    /// Scripture reference shown as the card title
    #[serde(default)]
    pub reference: String,

    /// Passage text split into memorisation cards
    #[serde(default)]
    pub cards: Vec<String>,

    #[serde(default)]
    pub verse_count: u32,

    /// Words in the passage; the only field selection looks at
    pub word_count: u32,

    #[serde(default)]
    pub translation: String,

    /// Release label of the passage list
    #[serde(default)]
    pub release: String,

    /// Fields we don't model, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Passage
{
    /// Full passage text with cards joined by single spaces
    pub fn text(&self) -> String
    {
        self.cards
            .join(" ")
    }
}

impl Weighted for Passage
{
    fn word_count(&self) -> u32
    {
        self.word_count
    }
}
