use thiserror::Error;

/// Failures of the generation core. All are terminal for the request in
/// which they occur; nothing is retried internally.
#[derive(Error, Debug)]
pub enum CutupError {
    #[error("corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("not enough phrases in corpus: have {have}, need at least {need}")]
    InsufficientCorpus { have: usize, need: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
