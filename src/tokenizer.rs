//! Japanese phrase extraction.
//!
//! Splits raw lyrics text into word-like phrase units without a dictionary:
//! maximal runs of a single character class (hiragana, katakana, kanji,
//! ASCII alphanumeric) become candidate tokens, trailing particles are split
//! off, and short fragments are filtered out.
//!
//! Particle detection only tests the final character of a candidate, against
//! the individual glyphs of the particle list. Multi-character particles
//! (から, まで, より) therefore match through their constituent characters,
//! and a word that merely ends in ら is split as if it carried から. This is
//! a known limitation of the heuristic and is kept as-is; cut-up output
//! tolerates the occasional bad split.

/// Sentence-ending and comma marks removed during normalization.
const SENTENCE_MARKS: &[char] = &['。', '！', '？', '、', '，'];

/// Glyphs of the case/topic particles は が を に で と から まで より,
/// flattened to single characters.
const PARTICLE_CHARS: &[char] = &[
    'は', 'が', 'を', 'に', 'で', 'と', 'か', 'ら', 'ま', 'よ', 'り',
];

/// Single characters that carry enough meaning to stand alone.
const MEANINGFUL_SINGLES: &[char] = &['愛', '心', '夢', '光', '闇'];

/// Character classes whose runs form candidate tokens. Anything outside
/// these classes separates runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Hiragana,
    Katakana,
    Kanji,
    Alphanumeric,
}

fn classify(c: char) -> Option<CharClass> {
    match c {
        'ぁ'..='ゟ' => Some(CharClass::Hiragana),
        'ァ'..='ヿ' => Some(CharClass::Katakana),
        '一'..='龯' => Some(CharClass::Kanji),
        '0'..='9' | 'a'..='z' | 'A'..='Z' => Some(CharClass::Alphanumeric),
        _ => None,
    }
}

/// Extract phrase tokens from raw lyrics text, in document order.
///
/// Pure and deterministic: identical input always yields the identical
/// token sequence. All lengths are character counts, never bytes.
pub fn extract_phrases(text: &str) -> Vec<String> {
    let normalized = normalize(text);

    let mut tokens = Vec::new();
    for run in class_runs(&normalized) {
        split_trailing_particle(&run, &mut tokens);
    }

    tokens.retain(|token| keep(token));
    tokens
}

/// Collapse newline runs to a single space and drop sentence marks entirely.
/// Dropping (rather than spacing) the marks lets a run continue across them.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_newline = false;

    for c in text.chars() {
        if c == '\n' {
            if !prev_newline {
                out.push(' ');
            }
            prev_newline = true;
            continue;
        }
        prev_newline = false;

        if SENTENCE_MARKS.contains(&c) {
            continue;
        }
        out.push(c);
    }

    out
}

/// Maximal runs of a single character class, left to right. Characters
/// outside every class are separators and appear in no run.
fn class_runs(text: &str) -> Vec<Vec<char>> {
    let mut runs: Vec<Vec<char>> = Vec::new();
    let mut current: Vec<char> = Vec::new();
    let mut current_class: Option<CharClass> = None;

    for c in text.chars() {
        match classify(c) {
            Some(class) if current_class == Some(class) => current.push(c),
            Some(class) => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                current.push(c);
                current_class = Some(class);
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                current_class = None;
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// Split a trailing particle character off a candidate run.
///
/// A candidate longer than one character ending in a particle glyph emits
/// the stem (only if the stem itself has at least two characters) followed
/// by the particle as its own token. Everything else passes through whole.
fn split_trailing_particle(run: &[char], out: &mut Vec<String>) {
    let Some(&last) = run.last() else {
        return;
    };

    if run.len() > 1 && PARTICLE_CHARS.contains(&last) {
        if run.len() > 2 {
            out.push(run[..run.len() - 1].iter().collect());
        }
        out.push(last.to_string());
    } else {
        out.push(run.iter().collect());
    }
}

/// Keep tokens of two or more characters, plus the allowed single
/// characters (particle glyphs and the meaningful-singles set).
fn keep(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(_), Some(_)) => true,
        (Some(only), None) => {
            PARTICLE_CHARS.contains(&only) || MEANINGFUL_SINGLES.contains(&only)
        }
        (None, _) => false,
    }
}
