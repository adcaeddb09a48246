//! Object framing and commit parsing.
//!
//! Decoded loose objects start with a `"<type> <size>\0"` header; [`header`]
//! parses and writes it. [`parse_parents`] pulls the ordered parent list out
//! of a commit's text, which is all the graph needs from a commit.

mod commit;
pub mod header;

pub use commit::parse_parents;

use bstr::BString;
use topo_hash::HashError;

/// Errors produced by object parsing.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("invalid object type: {0}")]
    InvalidType(BString),

    #[error("invalid object header: {0}")]
    InvalidHeader(String),

    #[error("truncated object: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("malformed parent line: {line:?}")]
    MalformedParent { line: String },

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The four kinds of stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectType {
    /// Parse the type word of an object header.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            b"tag" => Ok(Self::Tag),
            _ => Err(ObjectError::InvalidType(BString::from(s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
            Self::Tag => "tag",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        for ty in [ObjectType::Blob, ObjectType::Tree, ObjectType::Commit, ObjectType::Tag] {
            assert_eq!(ty.as_str().parse::<ObjectType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_type() {
        let err = ObjectType::from_bytes(b"note").unwrap_err();
        assert_eq!(err.to_string(), "invalid object type: note");
    }
}
