//! # Dictionary
//!
//! Content-addressable storage for text at three granularities, and the
//! decomposition engine that fills it.
//!
//! - Characters are keyed by the SHA-256 of their UTF-8 bytes
//! - Words and phrases are keyed by the SHA-256 of their children's digests,
//!   so equal child sequences always collapse to one entry
//! - The tokenizer reuses known sentences, clauses and words by hash lookup
//!   instead of decomposing them again

mod cancel;
mod digest;
pub mod segment;
mod store;
mod tokenizer;

pub use cancel::CancelFlag;
pub use digest::{hash, DigestFn, Sha256};
pub use store::{ContentStore, Resolved, StoreStats};
pub use tokenizer::{Decomposition, Emission, Level, Tokenizer, TokenizerConfig};
