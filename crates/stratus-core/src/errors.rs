//! Errors raised while loading, diffing and displaying graphs.
//!
//! Core operations return [`StratusError`]. At the logging boundary each
//! variant is flattened into an [`ExError`] whose [`ExErrorKind`] carries a
//! stable `ERR_*` code.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StratusError>;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Display options that cannot produce output
    InvalidConfig,
    /// A referenced node is absent
    NotFound,
    InvalidInput,
    /// Snapshot text that does not follow the assertion grammar
    Parse,
    Io,
    Serialization,
    Internal,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Flattened error with a kind and optional operation, node and line context
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node: Option<String>,
    line: Option<usize>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node: None,
            line: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// `type/id` of the node involved
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// 1-based line in the snapshot file
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node) = &self.node {
            write!(f, " (node: {})", node)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

/// Failure of a core operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StratusError {
    /// Tree output was requested without a root node
    #[error("Tree format requires a root node")]
    MissingRootNode,

    /// The configured root node is absent from the source
    #[error("Root node not found in source: {node}")]
    RootNotFound { node: String },

    /// Output format name is not one of table, csv, porcelain, tree
    #[error("Unsupported output format: {name}")]
    UnsupportedFormat { name: String },

    /// Resource type name outside the known vocabulary
    #[error("Unknown resource type: {name}")]
    UnknownResourceType { name: String },

    /// An assertion line could not be parsed
    #[error("Malformed assertion at line {line}: {reason}")]
    MalformedAssertion { line: usize, reason: String },

    /// Failure writing output or reading input
    #[error("I/O error: {message}")]
    Io { message: String },

    /// JSON encoding of a diff or property value failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A renderer was handed a view it cannot draw
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<StratusError> for ExError {
    fn from(err: StratusError) -> Self {
        match err {
            StratusError::MissingRootNode => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("build_displayer")
                .with_message("Tree format requires a root node"),

            StratusError::RootNotFound { node } => ExError::new(ExErrorKind::NotFound)
                .with_op("build_displayer")
                .with_node(node)
                .with_message("Root node not found in source"),

            StratusError::UnsupportedFormat { name } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("parse_format")
                .with_message(format!("Unsupported output format '{}'", name)),

            StratusError::UnknownResourceType { name } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_resource_type")
                .with_message(format!("Unknown resource type '{}'", name)),

            StratusError::MalformedAssertion { line, reason } => {
                ExError::new(ExErrorKind::Parse)
                    .with_op("parse_assertions")
                    .with_line(line)
                    .with_message(reason)
            }

            StratusError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),

            StratusError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            StratusError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<std::io::Error> for StratusError {
    fn from(err: std::io::Error) -> Self {
        StratusError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::fmt::Error> for StratusError {
    fn from(err: std::fmt::Error) -> Self {
        StratusError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StratusError {
    fn from(err: serde_json::Error) -> Self {
        StratusError::Serialization {
            message: err.to_string(),
        }
    }
}
