//! # bytedict
//!
//! Content-addressable dictionary for text. Every character, word and
//! phrase is stored exactly once, keyed by a digest of its content.
//!
//! ## Quick Start
//!
//! ```rust
//! use bytedict::{ContentStore, Tokenizer};
//!
//! let store = ContentStore::new();
//!
//! // Direct insertion
//! let cat = store.insert_word("cat").unwrap();
//! assert_eq!(store.get_word(&cat).as_deref(), Some("cat"));
//!
//! // Decompose text, reusing whatever the store already knows
//! let tokenizer = Tokenizer::new(&store);
//! let digests = tokenizer.tokenize_and_embed("Hi. Bye!").unwrap();
//! assert!(digests.iter().all(|d| store.resolve(d).is_some()));
//! ```
//!
//! ## Digest Composition
//!
//! | Unit | Key |
//! |------|-----|
//! | Character | `H(utf8 bytes)` |
//! | Word | `H(d(c1) ∥ … ∥ d(cn))` over its code points |
//! | Phrase | `H(d(t1) ∥ … ∥ d(tn))` over its word/punctuation tokens |
//!
//! Clauses and sentences are both phrases and share one mapping. A
//! sentence gets the same digest whether it was inserted directly or
//! produced by the [`Tokenizer`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | `Digest`, `Granularity`, `TextInput` |
//! | [`dictionary`] | Digest function, content store, segmentation, tokenizer |
//! | [`error`] | Error types with thiserror: InvalidInputType, Encoding, Cancelled, etc. |

pub mod dictionary;
pub mod error;
pub mod types;

pub use dictionary::{
    hash, CancelFlag, ContentStore, Decomposition, DigestFn, Emission, Level, Resolved, Sha256,
    StoreStats, Tokenizer, TokenizerConfig,
};
pub use error::{DictError, DictResult};
pub use types::*;
