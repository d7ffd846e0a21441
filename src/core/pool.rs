//! Passage pools loaded from `{root}/{year}/{division}-{translation}.json`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use moka::sync::Cache;
use tracing::{debug, instrument};

use crate::core::passage::Passage;

/// One category of passages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolKey
{
    pub division: String,
    pub translation: String,
}

impl PoolKey
{
    pub fn new(
        division: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self
    {
        Self { division: division.into(), translation: translation.into() }
    }

    /// File stem, lowercased: `senior-nkjv`
    pub fn stem(&self) -> String
    {
        format!(
            "{}-{}",
            self.division
                .to_lowercase(),
            self.translation
                .to_lowercase()
        )
    }
}

impl fmt::Display for PoolKey
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(&self.stem())
    }
}

/// Supplies the passages of one category
pub trait PoolSource
{
    fn fetch(
        &self,
        key: &PoolKey,
    ) -> Result<Arc<Vec<Passage>>>;
}

/// Decode a pool file body
pub fn parse_pool(text: &str) -> Result<Vec<Passage>>
{
    serde_json::from_str(text).context("Failed to parse passage pool")
}

/// Pool files under a directory tree, cached per key
pub struct DirPoolSource
{
    root: PathBuf,
    year: u16,
    cache: Cache<PoolKey, Arc<Vec<Passage>>>,
}

impl DirPoolSource
{
    pub fn new(
        root: impl Into<PathBuf>,
        year: u16,
    ) -> Self
    {
        Self { root: root.into(), year, cache: Cache::new(64) }
    }

    pub fn root(&self) -> &Path
    {
        &self.root
    }

    /// Where the pool for `key` is expected on disk
    pub fn path_for(
        &self,
        key: &PoolKey,
    ) -> PathBuf
    {
        self.root
            .join(self.year.to_string())
            .join(format!("{}.json", key.stem()))
    }

    fn load(
        &self,
        key: &PoolKey,
    ) -> Result<Arc<Vec<Passage>>>
    {
        let path = self.path_for(key);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read pool file {}", path.display()))?;
        let passages =
            parse_pool(&text).with_context(|| format!("Invalid pool file {}", path.display()))?;

        debug!(passages = passages.len(), path = %path.display(), "loaded pool");
        Ok(Arc::new(passages))
    }
}

impl PoolSource for DirPoolSource
{
    #[instrument(level = "debug", skip_all, fields(key = %key))]
    fn fetch(
        &self,
        key: &PoolKey,
    ) -> Result<Arc<Vec<Passage>>>
    {
        if let Some(hit) = self.cache.get(key)
        {
            debug!("pool cache hit");
            return Ok(hit);
        }

        let pool = self.load(key)?;
        self.cache
            .insert(key.clone(), Arc::clone(&pool));
        Ok(pool)
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use assert_fs::prelude::*;

    use super::*;

    const POOL: &str = r#"[
        {"division":"Senior","passage_number":1,"reference":"Gen 1:1-3","cards":["(1) In the beginning"],"verse_count":3,"word_count":48,"translation":"NKJV","release":"2024"},
        {"division":"Senior","passage_number":2,"reference":"Ps 23","cards":["(1) The Lord is my shepherd"],"verse_count":6,"word_count":118,"translation":"NKJV","release":"2024"}
    ]"#;

    #[test]
    fn stem_is_lowercase()
    {
        let key = PoolKey::new("Senior", "NKJV");
        assert_eq!(key.stem(), "senior-nkjv");
        assert_eq!(key.to_string(), "senior-nkjv");
    }

    #[test]
    fn path_follows_year_layout()
    {
        let src = DirPoolSource::new("/data", 2024);
        let path = src.path_for(&PoolKey::new("Junior", "KJV"));
        assert_eq!(path, PathBuf::from("/data/2024/junior-kjv.json"));
    }

    #[test]
    fn fetch_reads_and_caches()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("2024/senior-nkjv.json");
        file.write_str(POOL).unwrap();

        let src = DirPoolSource::new(tmp.path(), 2024);
        let key = PoolKey::new("senior", "nkjv");
        let first = src.fetch(&key).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].word_count, 118);

        // Served from cache even after the file is gone
        fs::remove_file(file.path()).unwrap();
        let second = src.fetch(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_names_the_path()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let src = DirPoolSource::new(tmp.path(), 2025);

        let err = src
            .fetch(&PoolKey::new("primary", "esv"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("primary-esv.json"));
    }

    #[test]
    fn malformed_pool_is_an_error()
    {
        assert!(parse_pool(r#"[{"reference":"no count"}]"#).is_err());
        assert!(parse_pool("not json").is_err());
        assert!(parse_pool("[]").unwrap().is_empty());
    }
}
