//! Error types for identifier encoding and documentation resolution
//!
//! Only invariant violations in the descriptor model and I/O failures surface
//! as errors. Lookup misses, malformed doc-file ids and cyclic inheritance are
//! absorbed by the attacher and the resolution engine.

use std::path::PathBuf;
use thiserror::Error;

/// A descriptor violates the model invariants; a bug in the upstream collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{kind} descriptor has an empty name")]
    EmptyName { kind: &'static str },

    #[error("Inconsistent type reference '{name}': {reason}")]
    InconsistentTypeRef { name: String, reason: &'static str },

    #[error("Conversion operator '{name}' has no return type")]
    MissingReturnType { name: String },

    #[error("Member '{name}' has no enclosing type")]
    MissingEnclosingType { name: String },
}

/// Malformed XML in a documentation file or fragment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("Malformed XML at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    #[error("Unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("Mismatched closing tag at byte {offset}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("Document has no root element")]
    NoRoot,
}

/// A documentation id string that cannot be split into prefix and name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocIdError {
    #[error("Missing '<prefix>:' in '{raw}'")]
    MissingPrefix { raw: String },

    #[error("Unknown prefix '{prefix}' in '{raw}'")]
    UnknownPrefix { prefix: String, raw: String },

    #[error("Empty name in '{raw}'")]
    EmptyName { raw: String },

    #[error("Member id '{raw}' has no owning type")]
    MissingOwner { raw: String },

    #[error("Malformed parameter list in '{raw}': {reason}")]
    MalformedParameters { raw: String, reason: &'static str },
}

/// A path expression on an `inheritdoc` marker that cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Empty path expression")]
    Empty,

    #[error("Unbalanced brackets in path '{path}'")]
    UnbalancedBracket { path: String },

    #[error("Invalid step '{step}' in path '{path}'")]
    InvalidStep { step: String, path: String },

    #[error("Unsupported predicate '[{predicate}]'")]
    InvalidPredicate { predicate: String },
}

/// Main error type for a documentation run
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse documentation file '{path}': {source}")]
    Xml { path: PathBuf, source: XmlError },

    #[error("Failed to read descriptors from '{path}': {source}")]
    Descriptors {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid descriptor: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    #[error("{0}")]
    General(String),
}

impl DocError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::Xml { .. } => "XML_ERROR",
            Self::Descriptors { .. } => "DESCRIPTOR_ERROR",
            Self::Encode(_) => "INVALID_DESCRIPTOR",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is not locked by another process",
            ],
            Self::Xml { .. } => vec![
                "Regenerate the documentation file with the compiler's documentation output enabled",
                "Check the file for truncated or hand-edited member entries",
            ],
            Self::Descriptors { .. } | Self::Encode(_) => vec![
                "The descriptor file was produced by an incompatible analyzer",
                "Re-run the structural analysis for this assembly",
            ],
            Self::ConfigError { .. } => {
                vec!["Run 'docweave init --force' to regenerate the configuration"]
            }
            _ => vec![],
        }
    }
}

impl From<Box<figment::Error>> for DocError {
    fn from(error: Box<figment::Error>) -> Self {
        DocError::ConfigError {
            reason: error.to_string(),
        }
    }
}

/// Result type alias for descriptor encoding
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type alias for XML reading
pub type XmlResult<T> = Result<T, XmlError>;

/// Result type alias for documentation runs
pub type DocResult<T> = Result<T, DocError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T, DocError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &str) -> Result<T, DocError> {
        self.map_err(|e| DocError::General(format!("{msg}: {e}")))
    }
}
