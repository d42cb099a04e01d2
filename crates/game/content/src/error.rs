//! Error taxonomy for definition loading.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`ContentError`], used by callers that only
/// care whether a failure came from the file, the data, or a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file could not be read or parsed as JSON.
    Load,
    /// The JSON parsed but an entry violates its schema or value domain.
    Validation,
    /// An entry names an id that does not exist in the referenced collection.
    Reference,
    /// A lookup asked for an id the repository does not hold.
    NotFound,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Validation => "validation",
            Self::Reference => "reference",
            Self::NotFound => "not_found",
        }
    }

    /// Whether the failure invalidates a whole definition file.
    pub const fn is_file_level(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Why a definition file could not be turned into a JSON value.
#[derive(Debug, Error)]
pub enum LoadCause {
    #[error("file not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),
}

impl From<std::io::Error> for LoadCause {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io(err),
        }
    }
}

impl From<serde_json::Error> for LoadCause {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Errors surfaced by the content pipeline.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadCause,
    },

    #[error("{context} {issue}")]
    Validation { context: String, issue: String },

    #[error(
        "{context} has schema issues (missing fields: {missing:?}; unknown fields: {unknown:?})"
    )]
    Schema {
        context: String,
        missing: Vec<String>,
        unknown: Vec<String>,
    },

    #[error("{context} references missing {target} '{id}'")]
    Reference {
        context: String,
        target: &'static str,
        id: String,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl ContentError {
    pub fn load(path: impl Into<PathBuf>, source: impl Into<LoadCause>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn validation(context: impl Into<String>, issue: impl Into<String>) -> Self {
        Self::Validation {
            context: context.into(),
            issue: issue.into(),
        }
    }

    pub fn reference(context: impl Into<String>, target: &'static str, id: impl Into<String>) -> Self {
        Self::Reference {
            context: context.into(),
            target,
            id: id.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load { .. } => ErrorKind::Load,
            Self::Validation { .. } | Self::Schema { .. } => ErrorKind::Validation,
            Self::Reference { .. } => ErrorKind::Reference,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Static identifier for the variant, for logs and test assertions.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load {
                source: LoadCause::NotFound,
                ..
            } => "CONTENT_FILE_NOT_FOUND",
            Self::Load {
                source: LoadCause::Io(_),
                ..
            } => "CONTENT_IO",
            Self::Load {
                source: LoadCause::Json(_),
                ..
            } => "CONTENT_INVALID_JSON",
            Self::Validation { .. } => "CONTENT_INVALID_VALUE",
            Self::Schema { .. } => "CONTENT_SCHEMA",
            Self::Reference { .. } => "CONTENT_DANGLING_REFERENCE",
            Self::NotFound { .. } => "CONTENT_NOT_FOUND",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
