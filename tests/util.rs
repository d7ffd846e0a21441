//! Shared test utilities for integration tests
//!
//! Builds a temporary pool directory laid out the way `recite` expects:
//! `<root>/2024/<division>-nkjv.json`.

#![allow(dead_code)]

use assert_fs::prelude::*;
use serde_json::{Value, json};

/// Word counts of the senior fixture: 20 passages between 70 and 111
/// words plus three that exceed the 170-word senior limit
pub fn senior_word_counts() -> Vec<u32>
{
    let mut words: Vec<u32> = (0..20)
        .map(|i| 70 + (i * 37 % 49))
        .collect();
    words.extend([200, 250, 300]);
    words
}

/// A pool file body with one passage per word count
pub fn pool_json(
    division: &str,
    words: &[u32],
) -> String
{
    let passages: Vec<Value> = words
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            json!({
                "division": division,
                "passage_number": i + 1,
                "reference": format!("Passage {}", i + 1),
                "cards": [format!("(1) first card of {}", i + 1), "(2) second card"],
                "verse_count": 2,
                "word_count": w,
                "translation": "NKJV",
                "release": "2024",
            })
        })
        .collect();
    Value::Array(passages).to_string()
}

/// Senior: feasible, junior: too small, primary: never in band
pub fn make_pool_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("pools/2024/senior-nkjv.json")
        .write_str(&pool_json("Senior", &senior_word_counts()))
        .expect("write senior");
    tmp.child("pools/2024/junior-nkjv.json")
        .write_str(&pool_json("Junior", &[100, 110, 120, 130, 140]))
        .expect("write junior");
    tmp.child("pools/2024/primary-nkjv.json")
        .write_str(&pool_json("Primary", &[50; 20]))
        .expect("write primary");

    tmp
}
