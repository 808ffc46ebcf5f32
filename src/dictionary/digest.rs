//! SHA-256 digest function and the composite rule.
//!
//! Leaves hash their own bytes. Composites hash the concatenation of their
//! children's digests, never their surface text.

use sha2::{Digest as _, Sha256 as Sha256Hasher};

use crate::types::{Digest, TextInput};

/// Fixed-output hash used to key every mapping in the store.
///
/// The store is generic over this so tests can force collisions.
pub trait DigestFn: Send + Sync {
    fn digest(&self, data: &[u8]) -> Digest;

    /// Digest of the children's digests, concatenated in order.
    fn combine(&self, children: &[Digest]) -> Digest {
        let mut buf = Vec::with_capacity(children.len() * Digest::LEN);
        for child in children {
            buf.extend_from_slice(child.as_bytes());
        }
        self.digest(&buf)
    }
}

/// SHA-256, the default digest function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl DigestFn for Sha256 {
    fn digest(&self, data: &[u8]) -> Digest {
        Digest::from_bytes(Sha256Hasher::digest(data).into())
    }

    fn combine(&self, children: &[Digest]) -> Digest {
        let mut hasher = Sha256Hasher::new();
        for child in children {
            hasher.update(child.as_bytes());
        }
        Digest::from_bytes(hasher.finalize().into())
    }
}

/// SHA-256 of text or bytes. Bytes are hashed without UTF-8 validation.
pub fn hash<'a>(data: impl Into<TextInput<'a>>) -> Digest {
    Sha256.digest(data.into().as_bytes())
}
