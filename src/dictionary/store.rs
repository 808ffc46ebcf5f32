//! Content store: digest-keyed mappings for characters, words, phrases
//! and caller-supplied embeddings.
//!
//! Every text mapping is insert-if-absent: the first payload stored under a
//! digest is kept forever, later inserts under the same digest only return
//! it. Nothing is ever removed.
//!
//! Besides the four payload mappings the store keeps two indexes that the
//! tokenizer relies on:
//! - **children**: composite digest → ordered child digests
//! - **surfaces**: digest of a unit's raw text → its composite digest, so a
//!   unit can be recognised before it is decomposed

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::digest::{DigestFn, Sha256};
use super::segment::{is_word_token, phrase_tokens};
use crate::error::DictResult;
use crate::types::{Digest, Granularity, TextInput};

/// Composite levels above a character: phrase, then word.
const MAX_COMPOSITE_DEPTH: usize = 2;

/// A payload found by [`ContentStore::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub granularity: Granularity,
    pub text: String,
}

/// Entry counts per mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub characters: usize,
    pub words: usize,
    pub phrases: usize,
    pub embeddings: usize,
}

/// The content-addressable dictionary.
///
/// All methods take `&self`; share it across threads as
/// `Arc<ContentStore>`. Concurrent inserts of the same unit are equivalent
/// to a single insert.
pub struct ContentStore<H: DigestFn = Sha256> {
    hasher: H,
    characters: DashMap<Digest, String>,
    words: DashMap<Digest, String>,
    phrases: DashMap<Digest, String>,
    embeddings: DashMap<Digest, Vec<f32>>,
    children: DashMap<Digest, Arc<[Digest]>>,
    word_surfaces: DashMap<Digest, Digest>,
    phrase_surfaces: DashMap<Digest, Digest>,
}

impl ContentStore<Sha256> {
    pub fn new() -> Self {
        Self::with_hasher(Sha256)
    }
}

impl<H: DigestFn> ContentStore<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            characters: DashMap::new(),
            words: DashMap::new(),
            phrases: DashMap::new(),
            embeddings: DashMap::new(),
            children: DashMap::new(),
            word_surfaces: DashMap::new(),
            phrase_surfaces: DashMap::new(),
        }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Digest of raw text or bytes under this store's hash function.
    pub fn digest_of<'a>(&self, data: impl Into<TextInput<'a>>) -> Digest {
        self.hasher.digest(data.into().as_bytes())
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Store a character under the digest of its UTF-8 bytes.
    pub fn insert_character<'a>(&self, unit: impl Into<TextInput<'a>>) -> DictResult<Digest> {
        let text = unit.into().into_text()?;
        Ok(self.insert_character_str(&text))
    }

    /// Store a word under the combined digest of its characters.
    /// Every character is stored as a side effect.
    pub fn insert_word<'a>(&self, unit: impl Into<TextInput<'a>>) -> DictResult<Digest> {
        let text = unit.into().into_text()?;
        Ok(self.insert_word_str(&text))
    }

    /// Store a phrase or sentence under the combined digest of its tokens.
    ///
    /// Alphanumeric tokens are stored as words, everything else (punctuation,
    /// runs containing `_`) as a single character entry.
    pub fn insert_phrase<'a>(&self, unit: impl Into<TextInput<'a>>) -> DictResult<Digest> {
        let text = unit.into().into_text()?;
        let tokens: Vec<Digest> = phrase_tokens(&text)
            .into_iter()
            .map(|token| self.insert_token(token))
            .collect();
        Ok(self.register_phrase(&text, tokens))
    }

    pub(crate) fn insert_character_str(&self, ch: &str) -> Digest {
        let digest = self.hasher.digest(ch.as_bytes());
        insert_if_absent(&self.characters, digest, ch, Granularity::Character);
        digest
    }

    pub(crate) fn insert_word_str(&self, word: &str) -> Digest {
        let mut buf = [0u8; 4];
        let chars: Vec<Digest> = word
            .chars()
            .map(|c| self.insert_character_str(c.encode_utf8(&mut buf)))
            .collect();
        self.register_word(word, chars)
    }

    /// One phrase token: a word, or a character entry for anything else.
    pub(crate) fn insert_token(&self, token: &str) -> Digest {
        if is_word_token(token) {
            self.insert_word_str(token)
        } else {
            self.insert_character_str(token)
        }
    }

    /// Record a word whose character digests are already computed.
    pub(crate) fn register_word(&self, word: &str, chars: Vec<Digest>) -> Digest {
        let combined = self.hasher.combine(&chars);
        insert_if_absent(&self.words, combined, word, Granularity::Word);
        self.record_composite(combined, chars);
        let surface = self.hasher.digest(word.as_bytes());
        self.word_surfaces.entry(surface).or_insert(combined);
        combined
    }

    /// Record a phrase whose token digests are already computed.
    pub(crate) fn register_phrase(&self, phrase: &str, tokens: Vec<Digest>) -> Digest {
        let combined = self.hasher.combine(&tokens);
        insert_if_absent(&self.phrases, combined, phrase, Granularity::Phrase);
        self.record_composite(combined, tokens);
        let surface = self.hasher.digest(phrase.as_bytes());
        self.phrase_surfaces.entry(surface).or_insert(combined);
        combined
    }

    fn record_composite(&self, digest: Digest, children: Vec<Digest>) {
        self.children
            .entry(digest)
            .or_insert_with(|| Arc::from(children));
    }

    // ─── Lookup ─────────────────────────────────────────────────────────────

    pub fn get_character(&self, digest: &Digest) -> Option<String> {
        self.characters.get(digest).map(|e| e.value().clone())
    }

    pub fn get_word(&self, digest: &Digest) -> Option<String> {
        self.words.get(digest).map(|e| e.value().clone())
    }

    pub fn get_phrase(&self, digest: &Digest) -> Option<String> {
        self.phrases.get(digest).map(|e| e.value().clone())
    }

    /// Look a digest up in every text mapping, coarsest first.
    pub fn resolve(&self, digest: &Digest) -> Option<Resolved> {
        let found = |granularity: Granularity, text: String| Resolved { granularity, text };
        self.get_phrase(digest)
            .map(|t| found(Granularity::Phrase, t))
            .or_else(|| self.get_word(digest).map(|t| found(Granularity::Word, t)))
            .or_else(|| {
                self.get_character(digest)
                    .map(|t| found(Granularity::Character, t))
            })
    }

    pub fn granularity_of(&self, digest: &Digest) -> Option<Granularity> {
        if self.phrases.contains_key(digest) {
            Some(Granularity::Phrase)
        } else if self.words.contains_key(digest) {
            Some(Granularity::Word)
        } else if self.characters.contains_key(digest) {
            Some(Granularity::Character)
        } else {
            None
        }
    }

    /// Ordered child digests of a word or phrase.
    pub fn children(&self, digest: &Digest) -> Option<Vec<Digest>> {
        self.children.get(digest).map(|e| e.value().to_vec())
    }

    /// Flatten a unit to its leaf (character-entry) digests.
    ///
    /// `None` if the digest is unknown, or if its children nest deeper than
    /// phrase → word → character (only possible under a colliding hash,
    /// where a composite can list itself as a child).
    pub fn expand(&self, digest: &Digest) -> Option<Vec<Digest>> {
        self.expand_at(digest, 0)
    }

    fn expand_at(&self, digest: &Digest, depth: usize) -> Option<Vec<Digest>> {
        if let Some(children) = self.children.get(digest).map(|e| Arc::clone(e.value())) {
            if depth >= MAX_COMPOSITE_DEPTH {
                tracing::warn!(digest = %digest.short(), "composite nests too deep, not expanding");
                return None;
            }
            let mut leaves = Vec::new();
            for child in children.iter() {
                leaves.extend(self.expand_at(child, depth + 1)?);
            }
            return Some(leaves);
        }
        self.characters.contains_key(digest).then(|| vec![*digest])
    }

    /// Composite digest of a word whose raw text hashes to `surface`.
    pub fn known_word(&self, surface: &Digest) -> Option<Digest> {
        self.word_surfaces.get(surface).map(|e| *e.value())
    }

    /// Composite digest of a phrase whose raw text hashes to `surface`.
    pub fn known_phrase(&self, surface: &Digest) -> Option<Digest> {
        self.phrase_surfaces.get(surface).map(|e| *e.value())
    }

    // ─── Embeddings ─────────────────────────────────────────────────────────

    /// Attach a vector to any digest. Replaces a previous vector; no check
    /// that the digest names stored text.
    pub fn set_embedding(&self, digest: Digest, vector: Vec<f32>) {
        self.embeddings.insert(digest, vector);
    }

    pub fn get_embedding(&self, digest: &Digest) -> Option<Vec<f32>> {
        self.embeddings.get(digest).map(|e| e.value().clone())
    }

    // ─── Stats ──────────────────────────────────────────────────────────────

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            characters: self.characters.len(),
            words: self.words.len(),
            phrases: self.phrases.len(),
            embeddings: self.embeddings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats() == StoreStats::default()
    }
}

impl<H: DigestFn + Default> Default for ContentStore<H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

fn insert_if_absent(
    map: &DashMap<Digest, String>,
    digest: Digest,
    text: &str,
    granularity: Granularity,
) {
    if let Entry::Vacant(slot) = map.entry(digest) {
        tracing::trace!(%granularity, digest = %digest.short(), "new dictionary entry");
        slot.insert(text.to_string());
    }
}
