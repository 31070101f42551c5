use case_fold::equal_fold;

/// Longest chirp body accepted, in bytes.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Replacement written over every blocked word.
pub const MASK: &str = "****";

const DEFAULT_BLOCKED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Lowercase words that are masked out of chirps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockList {
    words: Vec<String>,
}

impl BlockList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn words(&self) -> &[String] { &self.words }

    pub fn is_blocked(&self, token: &str) -> bool {
        self.words.iter().any(|word| equal_fold(word, token))
    }

    /// Masks every blocked word in `text`.
    ///
    /// Tokens are split on single spaces only: consecutive spaces produce
    /// empty tokens and tabs or newlines stay inside their token. Matching is
    /// on whole tokens under simple case folding, so `"Fornax"` and
    /// `"ſharbert"` are masked while `"fornax!"` is not.
    pub fn filter(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| if self.is_blocked(token) { MASK } else { token })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for BlockList {
    fn default() -> Self { Self::new(DEFAULT_BLOCKED_WORDS) }
}
