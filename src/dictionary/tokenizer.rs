//! Memoized hierarchical decomposition.
//!
//! Text is walked top-down: sentence → clause → word → character. At each
//! level the raw text is hashed and looked up in the store; a known unit is
//! emitted as one digest and not decomposed further. Unknown units descend a
//! level, and once their children are done the composite digest is computed
//! from the child digests that level returned and registered in the store.
//!
//! Output order is document order with children before their parent.

use serde::{Deserialize, Serialize};

use super::cancel::CancelFlag;
use super::digest::{DigestFn, Sha256};
use super::segment::{is_word_token, phrase_tokens, split_clauses, split_sentences};
use super::store::ContentStore;
use crate::error::{DictError, DictResult};
use crate::types::{Digest, TextInput};

/// Configuration for decomposition boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// A sentence ends at whitespace following one of these
    pub sentence_terminators: Vec<char>,
    /// A clause ends right after one of these
    pub clause_separators: Vec<char>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            sentence_terminators: vec!['.', '!', '?'],
            clause_separators: vec![',', ';'],
        }
    }
}

impl TokenizerConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> DictResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DictResult<()> {
        if self.sentence_terminators.is_empty() {
            return Err(DictError::Config(
                "sentence_terminators must not be empty".into(),
            ));
        }
        let boundaries = self
            .sentence_terminators
            .iter()
            .chain(&self.clause_separators);
        if let Some(c) = boundaries.clone().find(|c| c.is_whitespace()) {
            return Err(DictError::Config(format!(
                "boundary characters must not be whitespace, got {c:?}"
            )));
        }
        if let Some(c) = boundaries.clone().find(|c| c.is_alphanumeric() || **c == '_') {
            return Err(DictError::Config(format!(
                "boundary characters must not be word characters, got {c:?}"
            )));
        }
        Ok(())
    }
}

/// Granularity of an emitted digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Character,
    Word,
    Clause,
    Sentence,
}

/// One digest in the decomposition output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emission {
    pub digest: Digest,
    pub level: Level,
    /// Emitted from the store without decomposing
    pub memoized: bool,
}

impl Emission {
    fn fresh(digest: Digest, level: Level) -> Self {
        Self {
            digest,
            level,
            memoized: false,
        }
    }

    fn memoized(digest: Digest, level: Level) -> Self {
        Self {
            digest,
            level,
            memoized: true,
        }
    }
}

/// Decomposed text: every emitted digest, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub emissions: Vec<Emission>,
}

impl Decomposition {
    pub fn len(&self) -> usize {
        self.emissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }

    pub fn digests(&self) -> Vec<Digest> {
        self.emissions.iter().map(|e| e.digest).collect()
    }

    /// Digests of the sentences, one per input sentence
    pub fn sentences(&self) -> Vec<Digest> {
        self.at_level(Level::Sentence)
    }

    pub fn at_level(&self, level: Level) -> Vec<Digest> {
        self.emissions
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.digest)
            .collect()
    }

    pub fn memoized_count(&self) -> usize {
        self.emissions.iter().filter(|e| e.memoized).count()
    }
}

/// Decomposition engine over a caller-owned store
pub struct Tokenizer<'s, H: DigestFn = Sha256> {
    store: &'s ContentStore<H>,
    config: TokenizerConfig,
    cancel: CancelFlag,
}

impl<'s, H: DigestFn> Tokenizer<'s, H> {
    pub fn new(store: &'s ContentStore<H>) -> Self {
        Self {
            store,
            config: TokenizerConfig::default(),
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_config(store: &'s ContentStore<H>, config: TokenizerConfig) -> DictResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            cancel: CancelFlag::new(),
        })
    }

    /// Abort decompositions once `flag` is cancelled
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = flag;
        self
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn store(&self) -> &'s ContentStore<H> {
        self.store
    }

    /// Decompose text and return the digest sequence.
    pub fn tokenize_and_embed<'a>(
        &self,
        text: impl Into<TextInput<'a>>,
    ) -> DictResult<Vec<Digest>> {
        Ok(self.decompose(text)?.digests())
    }

    /// Decompose text, recording the level of every emitted digest.
    pub fn decompose<'a>(&self, text: impl Into<TextInput<'a>>) -> DictResult<Decomposition> {
        let text = text.into().into_text()?;
        let sentences = split_sentences(&text, &self.config.sentence_terminators);

        let mut out = Vec::new();
        for sentence in &sentences {
            self.sentence(sentence, &mut out)?;
        }

        let decomposition = Decomposition { emissions: out };
        tracing::debug!(
            sentences = sentences.len(),
            emitted = decomposition.len(),
            memoized = decomposition.memoized_count(),
            "decomposed text"
        );
        Ok(decomposition)
    }

    fn sentence(&self, sentence: &str, out: &mut Vec<Emission>) -> DictResult<()> {
        self.cancel.check()?;

        let surface = self.store.digest_of(sentence);
        if let Some(digest) = self.store.known_phrase(&surface) {
            tracing::trace!(digest = %digest.short(), "sentence memoized");
            out.push(Emission::memoized(digest, Level::Sentence));
            return Ok(());
        }

        let mut tokens = Vec::new();
        for clause in split_clauses(sentence, &self.config.clause_separators) {
            tokens.extend(self.clause(clause, out)?);
        }

        let digest = self.store.register_phrase(sentence, tokens);
        out.push(Emission::fresh(digest, Level::Sentence));
        Ok(())
    }

    /// Emits the clause and returns its token digests.
    fn clause(&self, clause: &str, out: &mut Vec<Emission>) -> DictResult<Vec<Digest>> {
        self.cancel.check()?;

        let surface = self.store.digest_of(clause);
        if let Some(digest) = self.store.known_phrase(&surface) {
            tracing::trace!(digest = %digest.short(), "clause memoized");
            out.push(Emission::memoized(digest, Level::Clause));
            // children are recorded before the surface index entry
            let tokens = match self.store.children(&digest) {
                Some(tokens) => tokens,
                None => phrase_tokens(clause)
                    .into_iter()
                    .map(|t| self.store.insert_token(t))
                    .collect(),
            };
            return Ok(tokens);
        }

        let mut tokens = Vec::new();
        for token in phrase_tokens(clause) {
            let digest = if is_word_token(token) {
                self.word(token, out)?
            } else {
                let digest = self.store.insert_character_str(token);
                out.push(Emission::fresh(digest, Level::Character));
                digest
            };
            tokens.push(digest);
        }

        let digest = self.store.register_phrase(clause, tokens.clone());
        out.push(Emission::fresh(digest, Level::Clause));
        Ok(tokens)
    }

    fn word(&self, word: &str, out: &mut Vec<Emission>) -> DictResult<Digest> {
        self.cancel.check()?;

        let surface = self.store.digest_of(word);
        if let Some(digest) = self.store.known_word(&surface) {
            out.push(Emission::memoized(digest, Level::Word));
            return Ok(digest);
        }

        // characters are never skipped
        let mut buf = [0u8; 4];
        let mut chars = Vec::with_capacity(word.len());
        for c in word.chars() {
            let digest = self.store.insert_character_str(c.encode_utf8(&mut buf));
            out.push(Emission::fresh(digest, Level::Character));
            chars.push(digest);
        }

        let digest = self.store.register_word(word, chars);
        out.push(Emission::fresh(digest, Level::Word));
        Ok(digest)
    }
}
