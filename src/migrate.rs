use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    // Create lyrics table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lyrics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create phrases table. part_of_speech is reserved for a future
    // morphological pass and is always NULL today.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS phrases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phrase TEXT NOT NULL,
            part_of_speech TEXT,
            lyrics_id INTEGER NOT NULL,
            FOREIGN KEY (lyrics_id) REFERENCES lyrics(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_phrases_lyrics_id ON phrases(lyrics_id)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_lyrics_filename ON lyrics(filename)")
        .execute(&pool)
        .await?;

    pool.close().await;
    Ok(())
}
