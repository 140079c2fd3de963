//! Full-rebuild ingestion pipeline.
//!
//! Coordinates the flow: scan → tokenize → persist. Every run clears the
//! previous phrase bank and repopulates it inside one transaction, so
//! readers never observe a half-built corpus. There is no incremental mode;
//! lyrics collections are small enough that a rebuild is the simpler
//! invariant.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::models::LyricsFile;
use crate::scan;
use crate::tokenizer::extract_phrases;

pub async fn run_ingest(config: &Config, dry_run: bool, limit: Option<usize>) -> Result<()> {
    let mut files = scan::scan_lyrics(config)?;

    // Apply --limit
    if let Some(lim) = limit {
        files.truncate(lim);
    }

    if dry_run {
        println!("ingest {} (dry-run)", config.lyrics.dir.display());
        println!("  files found: {}", files.len());
        let total_phrases: usize = files
            .iter()
            .map(|file| extract_phrases(&file.body).len())
            .sum();
        println!("  estimated phrases: {}", total_phrases);
        return Ok(());
    }

    let pool = db::connect(config).await?;
    let (lyrics_stored, phrases_stored) = rebuild(&pool, &files).await?;

    println!("ingest {}", config.lyrics.dir.display());
    println!("  files found: {}", files.len());
    println!("  lyrics stored: {}", lyrics_stored);
    println!("  phrases extracted: {}", phrases_stored);
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Replace the whole phrase bank with the given files' contents.
async fn rebuild(pool: &SqlitePool, files: &[LyricsFile]) -> Result<(u64, u64)> {
    let mut tx = pool.begin().await?;

    // Full rebuild: drop all previous rows before repopulating.
    sqlx::query("DELETE FROM phrases").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM lyrics").execute(&mut *tx).await?;

    let mut lyrics_stored = 0u64;
    let mut phrases_stored = 0u64;

    for file in files {
        let result =
            sqlx::query("INSERT INTO lyrics (filename, content, created_at) VALUES (?, ?, ?)")
                .bind(&file.filename)
                .bind(&file.body)
                .bind(file.modified_at.timestamp())
                .execute(&mut *tx)
                .await?;
        let lyrics_id = result.last_insert_rowid();

        for phrase in extract_phrases(&file.body) {
            sqlx::query("INSERT INTO phrases (phrase, lyrics_id) VALUES (?, ?)")
                .bind(&phrase)
                .bind(lyrics_id)
                .execute(&mut *tx)
                .await?;
            phrases_stored += 1;
        }

        lyrics_stored += 1;
    }

    tx.commit().await?;
    Ok((lyrics_stored, phrases_stored))
}
