//! Error types for node records and hashing.
//!
//! Every fallible operation in this crate returns `Result<T, NodeError>`.
//! None of these errors is fatal: whether a bad record aborts a whole mesh
//! read or is skipped is decided by the caller.

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

use crate::node::HashAlgorithm;

/// Field of a node record line, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Node number
    Id,
    /// X coordinate (or longitude)
    X,
    /// Y coordinate (or latitude)
    Y,
    /// Elevation/depth
    Z,
}

impl RecordField {
    /// Fields in the order they appear on a record line.
    pub const ALL: [RecordField; 4] = [
        RecordField::Id,
        RecordField::X,
        RecordField::Y,
        RecordField::Z,
    ];

    /// Lowercase field name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::X => "x",
            RecordField::Y => "y",
            RecordField::Z => "z",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a record line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordFault {
    /// Wrong number of whitespace-separated tokens.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A token could not be read as the value its field needs.
    #[error("invalid {field} value '{token}'")]
    InvalidField { field: RecordField, token: String },
}

/// Error type for node operations.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A record line could not be parsed. The node was not modified.
    #[error("Malformed node record '{line}': {fault}")]
    MalformedRecord { line: String, fault: RecordFault },

    /// Requested digest is not one of the supported algorithms.
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Digest backend for the selected algorithm is not compiled in.
    #[error("Hash algorithm {0} is not available in this build")]
    HashUnavailable(HashAlgorithm),

    /// I/O error while reading or writing a node block.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error on a specific line of a node block.
    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<NodeError>,
    },

    /// Node block ended before the declared number of records.
    #[error("Unexpected end of input: expected {expected} node records, found {found}")]
    UnexpectedEof { expected: usize, found: usize },
}

impl NodeError {
    /// Build a malformed-record error for `line`.
    pub(crate) fn malformed(line: &str, fault: RecordFault) -> Self {
        NodeError::MalformedRecord {
            line: line.trim().to_string(),
            fault,
        }
    }

    /// Attach a 1-based line number.
    pub(crate) fn at_line(self, line: usize) -> Self {
        NodeError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Whether this is (or wraps) a malformed record.
    pub fn is_malformed(&self) -> bool {
        match self {
            NodeError::MalformedRecord { .. } => true,
            NodeError::AtLine { source, .. } => source.is_malformed(),
            _ => false,
        }
    }

    /// Record fault behind this error, looking through line wrappers.
    pub fn fault(&self) -> Option<&RecordFault> {
        match self {
            NodeError::MalformedRecord { fault, .. } => Some(fault),
            NodeError::AtLine { source, .. } => source.fault(),
            _ => None,
        }
    }
}

// Lets `set_hash_algorithm` take a `HashAlgorithm` directly.
impl From<Infallible> for NodeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
