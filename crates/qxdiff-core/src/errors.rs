use std::path::Path;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Reported problems in a descriptor are differences, not errors. This
/// taxonomy only covers failures of the host layers around the analyzer:
/// reading archives, parsing documents, compiling rules and loading config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    /// An input artifact could not be opened as an archive
    InvalidInput,
    /// Descriptor bytes are not valid UTF-8 YAML, or use non-string mapping keys
    InvalidDocument,
    /// A rule or locator pattern is not a valid regular expression
    InvalidPattern,
    /// Configuration file could not be parsed or contains unknown keys
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation and document path that failed.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file or archive path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised while loading descriptors and configuration
#[derive(Error, Debug)]
pub enum DiffError {
    /// Descriptor is not valid YAML (or not representable as a JSON tree)
    #[error("Invalid YAML in {file}: {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Descriptor bytes are not UTF-8
    #[error("Descriptor {file} is not valid UTF-8")]
    NotUtf8 { file: String },

    /// Filesystem access failed
    #[error("I/O failure during {operation} on {path}: {source}")]
    Io {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Packaged archive could not be read as a zip
    #[error("Unreadable archive {archive}: {source}")]
    Archive {
        archive: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// A path pattern failed to compile
    #[error("Invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {source}")]
    Config {
        #[source]
        source: toml::de::Error,
    },
}

impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        let message = err.to_string();
        match err {
            DiffError::Yaml { file, .. } => ExError::new(ExErrorKind::InvalidDocument)
                .with_op("parse_document")
                .with_path(file)
                .with_message(message),

            DiffError::NotUtf8 { file } => ExError::new(ExErrorKind::InvalidDocument)
                .with_op("decode_document")
                .with_path(file)
                .with_message(message),

            DiffError::Io {
                operation, path, ..
            } => ExError::new(ExErrorKind::Io)
                .with_op(operation)
                .with_path(path)
                .with_message(message),

            DiffError::Archive { archive, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("open_archive")
                .with_path(archive)
                .with_message(message),

            DiffError::Pattern { .. } => ExError::new(ExErrorKind::InvalidPattern)
                .with_op("compile_pattern")
                .with_message(message),

            DiffError::Config { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),
        }
    }
}

/// Create an IO error for a filesystem path
pub fn io_error(operation: &str, path: &Path, source: std::io::Error) -> ExError {
    DiffError::Io {
        operation: operation.to_string(),
        path: path.display().to_string(),
        source,
    }
    .into()
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
