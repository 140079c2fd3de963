//! Stochastic cut-up generation.
//!
//! Each output phrase is built from 2 to 4 phrases sampled without
//! replacement from the phrase bank, concatenated with an occasional
//! connector particle between bare phrase boundaries. The connector step is
//! a frequency heuristic, not a grammar check: it reduces how often two
//! bare phrases butt together, and guarantees nothing about the result
//! being valid Japanese.
//!
//! All randomness comes through the injected [`Rng`], so a seeded generator
//! reproduces a batch exactly.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::corpus::{self, Corpus, MIN_CORPUS_SIZE};
use crate::error::CutupError;
use crate::models::{CutupPhrase, SourceAttribution};

/// Fewest and most phrases combined into one cut-up.
const MIN_PARTS: usize = 2;
const MAX_PARTS: usize = 4;

/// Chance of appending a connector after a non-final phrase that does not
/// already end in a binding particle.
const CONNECTOR_PROBABILITY: f64 = 0.3;

/// Connector candidates, drawn uniformly.
const CONNECTORS: &[char] = &['の', 'に', 'で', 'と'];

/// Particles that already bind a phrase to the next one. No connector is
/// inserted after a phrase ending in one of these.
const BINDING_PARTICLES: &[char] = &['は', 'が', 'を', 'に', 'で', 'と'];

/// Produce `count` cut-up phrases from the corpus.
///
/// Fails with `InsufficientCorpus` when the bank holds fewer than
/// [`MIN_CORPUS_SIZE`] entries. Each output samples independently, so a
/// phrase may recur across the batch but never within one output. The
/// corpus is never mutated.
pub fn generate_cutups(
    corpus: &Corpus,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<CutupPhrase>, CutupError> {
    if corpus.len() < MIN_CORPUS_SIZE {
        return Err(CutupError::InsufficientCorpus {
            have: corpus.len(),
            need: MIN_CORPUS_SIZE,
        });
    }

    let mut phrases = Vec::with_capacity(count);
    for _ in 0..count {
        let parts_wanted = rng.random_range(MIN_PARTS..=MAX_PARTS);
        let picked = corpus.sample(parts_wanted.min(corpus.len()), rng);

        let sources: Vec<SourceAttribution> = picked
            .iter()
            .map(|entry| SourceAttribution {
                word: entry.text.clone(),
                filename: entry.filename.clone(),
            })
            .collect();

        let parts: Vec<&str> = picked.iter().map(|entry| entry.text.as_str()).collect();
        let text = combine_phrases(&parts, rng);

        phrases.push(CutupPhrase { text, sources });
    }

    Ok(phrases)
}

/// Concatenate sampled phrases in order, with no separator. After each
/// non-final phrase that does not end in a binding particle, a connector is
/// appended with probability [`CONNECTOR_PROBABILITY`]. The final phrase is
/// never modified.
fn combine_phrases(parts: &[&str], rng: &mut impl Rng) -> String {
    let mut combined = String::new();

    for (i, part) in parts.iter().enumerate() {
        combined.push_str(part);
        if i + 1 == parts.len() {
            break;
        }

        let bound = part
            .chars()
            .last()
            .is_some_and(|c| BINDING_PARTICLES.contains(&c));
        if !bound && rng.random_bool(CONNECTOR_PROBABILITY) {
            if let Some(&connector) = CONNECTORS.choose(rng) {
                combined.push(connector);
            }
        }
    }

    combined
}

/// CLI entry point: load the corpus, generate, print.
///
/// `--seed` routes through a seeded [`StdRng`] for reproducible batches;
/// unseeded runs use the thread-local generator.
pub async fn run_generate(
    config: &Config,
    count: Option<i64>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let count = config.generate.resolve_count(count)?;
    let corpus = corpus::open_corpus(config).await?;

    let phrases = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_cutups(&corpus, count, &mut rng)?
        }
        None => {
            let mut rng = rand::rng();
            generate_cutups(&corpus, count, &mut rng)?
        }
    };

    if json {
        let body = serde_json::json!({ "phrases": phrases, "count": phrases.len() });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    for (i, phrase) in phrases.iter().enumerate() {
        println!("{:>3}. {}", i + 1, phrase.text);
        for source in &phrase.sources {
            println!("     {} ({})", source.word, source.filename);
        }
    }

    Ok(())
}
