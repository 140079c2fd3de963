use anyhow::{bail, Result};
use chrono::{TimeZone, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::LyricsFile;

pub fn scan_lyrics(config: &Config) -> Result<Vec<LyricsFile>> {
    let lyrics = &config.lyrics;

    let root = &lyrics.dir;
    if !root.exists() {
        bail!("Lyrics directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&lyrics.include_globs)?;
    let exclude_set = build_globset(&lyrics.exclude_globs)?;

    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(lyrics.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        // Apply exclude patterns
        if exclude_set.is_match(&rel_str) {
            continue;
        }

        // Apply include patterns
        if !include_set.is_match(&rel_str) {
            continue;
        }

        let metadata = std::fs::metadata(path)?;
        let modified = metadata
            .modified()
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
        let modified_secs = modified
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        let body = std::fs::read_to_string(path).unwrap_or_default();

        files.push(LyricsFile {
            filename: rel_str,
            body,
            modified_at: Utc.timestamp_opt(modified_secs, 0).unwrap(),
        });
    }

    // Sort for deterministic ordering
    files.sort_by(|a, b| a.filename.cmp(&b.filename));

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
