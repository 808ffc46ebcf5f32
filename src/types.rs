use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DictError, DictResult};

// ─── Digest ─────────────────────────────────────────────────────────────────

/// A 256-bit content digest.
///
/// Characters are keyed by the digest of their UTF-8 bytes; words and
/// phrases by the digest of their children's concatenated digests.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; Digest::LEN]);

impl Digest {
    /// Digest width in bytes.
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Full 64-char lowercase hex form
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First 12 hex chars, for log lines
    pub fn short(&self) -> String {
        self.0[..6].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; Digest::LEN]> for Digest {
    fn from(bytes: [u8; Digest::LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl FromStr for Digest {
    type Err = DictError;

    fn from_str(s: &str) -> DictResult<Self> {
        if s.len() != Self::LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DictError::InvalidDigest(format!(
                "expected {} hex chars, got {s:?}",
                Self::LEN * 2
            )));
        }
        let mut bytes = [0u8; Self::LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|e| DictError::InvalidDigest(e.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Granularity ────────────────────────────────────────────────────────────

/// Which text mapping a payload lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Character,
    Word,
    Phrase,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Character => write!(f, "character"),
            Granularity::Word => write!(f, "word"),
            Granularity::Phrase => write!(f, "phrase"),
        }
    }
}

// ─── Text Input ─────────────────────────────────────────────────────────────

/// Text handed to the dictionary, either as a string or as raw bytes.
///
/// Bytes are hashed as-is; anything stored must decode as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput<'a> {
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
}

impl<'a> TextInput<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TextInput::Text(s) => s.as_bytes(),
            TextInput::Bytes(b) => b,
        }
    }

    /// Decode into text, rejecting malformed UTF-8.
    pub fn into_text(self) -> DictResult<Cow<'a, str>> {
        match self {
            TextInput::Text(s) => Ok(s),
            TextInput::Bytes(Cow::Borrowed(b)) => Ok(Cow::Borrowed(std::str::from_utf8(b)?)),
            TextInput::Bytes(Cow::Owned(b)) => Ok(Cow::Owned(String::from_utf8(b)?)),
        }
    }

    /// Accept a dynamically typed value: a JSON string, or an array of
    /// byte values (0-255).
    pub fn from_json(value: &'a serde_json::Value) -> DictResult<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(TextInput::Text(Cow::Borrowed(s))),
            Value::Array(items) => {
                let bytes = items
                    .iter()
                    .map(|item| {
                        item.as_u64()
                            .and_then(|n| u8::try_from(n).ok())
                            .ok_or_else(|| DictError::InvalidInputType {
                                found: format!("array element {item}"),
                            })
                    })
                    .collect::<DictResult<Vec<u8>>>()?;
                Ok(TextInput::Bytes(Cow::Owned(bytes)))
            }
            other => Err(DictError::InvalidInputType {
                found: json_kind(other).to_string(),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(s: &'a str) -> Self {
        TextInput::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for TextInput<'a> {
    fn from(s: &'a String) -> Self {
        TextInput::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for TextInput<'_> {
    fn from(s: String) -> Self {
        TextInput::Text(Cow::Owned(s))
    }
}

impl From<char> for TextInput<'_> {
    fn from(c: char) -> Self {
        TextInput::Text(Cow::Owned(c.to_string()))
    }
}

impl<'a> From<&'a [u8]> for TextInput<'a> {
    fn from(b: &'a [u8]) -> Self {
        TextInput::Bytes(Cow::Borrowed(b))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for TextInput<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        TextInput::Bytes(Cow::Borrowed(b.as_slice()))
    }
}

impl<'a> From<&'a Vec<u8>> for TextInput<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        TextInput::Bytes(Cow::Borrowed(b.as_slice()))
    }
}

impl From<Vec<u8>> for TextInput<'_> {
    fn from(b: Vec<u8>) -> Self {
        TextInput::Bytes(Cow::Owned(b))
    }
}
