//! Core data models used throughout Lyrics Cutup.
//!
//! These types represent the lyrics files, phrase bank entries, and
//! generated output that flow through the ingestion and generation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A lyrics file found by the scanner, before tokenization.
#[derive(Debug, Clone)]
pub struct LyricsFile {
    pub filename: String,
    pub body: String,
    pub modified_at: DateTime<Utc>,
}

/// One entry of the phrase bank: a phrase plus the filename of the lyrics
/// file it was extracted from. The filename is a lookup key, not a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    pub text: String,
    pub filename: String,
}

/// Provenance for one sampled phrase inside a generated cut-up.
/// A denormalized copy; it stays valid after the corpus is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceAttribution {
    pub word: String,
    pub filename: String,
}

/// A generated cut-up phrase: the combined text plus its sources in the
/// order they were sampled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutupPhrase {
    pub text: String,
    pub sources: Vec<SourceAttribution>,
}
