//! Database statistics and overview.
//!
//! Provides a quick summary of what's in the phrase bank: lyrics and phrase
//! counts plus a per-file breakdown. Used by `cutup stats` to give
//! confidence that an ingest captured what was expected.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let total_lyrics: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lyrics")
        .fetch_one(&pool)
        .await?;

    let total_phrases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM phrases")
        .fetch_one(&pool)
        .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Lyrics Cutup — Database Stats");
    println!("=============================");
    println!();
    println!("  Database:  {}", config.db.path.display());
    println!("  Size:      {}", format_bytes(db_size));
    println!();
    println!("  Lyrics:    {}", total_lyrics);
    println!("  Phrases:   {}", total_phrases);

    // Per-file breakdown
    let file_rows = sqlx::query(
        r#"
        SELECT
            l.filename,
            COUNT(p.id) AS phrase_count
        FROM lyrics l
        LEFT JOIN phrases p ON p.lyrics_id = l.id
        GROUP BY l.id
        ORDER BY phrase_count DESC, l.filename ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    if !file_rows.is_empty() {
        println!();
        println!("  By file:");
        println!("  {:<32} {:>8}", "FILE", "PHRASES");
        println!("  {}", "-".repeat(42));

        for row in &file_rows {
            let filename: String = row.get("filename");
            let phrase_count: i64 = row.get("phrase_count");
            println!("  {:<32} {:>8}", filename, phrase_count);
        }
    }

    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
