//! Read-only access to the phrase bank.
//!
//! The corpus is the full set of `(phrase, filename)` rows, loaded into
//! memory in insertion order. It is never deduplicated and never mutated
//! after loading; generation only reads from it.

use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::error::CutupError;
use crate::models::PhraseEntry;

/// Fewest phrase bank entries the generator will work against.
pub const MIN_CORPUS_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<PhraseEntry>,
}

impl Corpus {
    pub fn from_entries(entries: Vec<PhraseEntry>) -> Self {
        Self { entries }
    }

    /// Load every phrase with its source filename, in insertion order.
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let rows = sqlx::query(
            "SELECT p.phrase, l.filename FROM phrases p JOIN lyrics l ON p.lyrics_id = l.id ORDER BY p.id",
        )
        .fetch_all(pool)
        .await?;

        let entries = rows
            .iter()
            .map(|row| PhraseEntry {
                text: row.get("phrase"),
                filename: row.get("filename"),
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly sample `k` distinct entries without replacement.
    /// Yields fewer than `k` entries only when `k` exceeds `len()`.
    pub fn sample(&self, k: usize, rng: &mut impl Rng) -> Vec<&PhraseEntry> {
        self.entries.choose_multiple(rng, k).collect()
    }
}

/// Open the phrase bank for generation. A missing or unreadable database is
/// `CorpusUnavailable`, distinct from an underpopulated one, so the boundary
/// can report the two differently.
pub async fn open_corpus(config: &Config) -> Result<Corpus, CutupError> {
    if !config.db.path.exists() {
        return Err(CutupError::CorpusUnavailable(format!(
            "database not found at {}",
            config.db.path.display()
        )));
    }

    let pool = db::open_readonly(config)
        .await
        .map_err(|e| CutupError::CorpusUnavailable(e.to_string()))?;

    let corpus = Corpus::load(&pool)
        .await
        .map_err(|e| CutupError::CorpusUnavailable(e.to_string()))?;

    pool.close().await;
    Ok(corpus)
}
