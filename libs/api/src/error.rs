/// Category of a queue provider error. Lets the poll loop decide
/// between retrying and failing fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration (bad endpoint, missing queue) — permanent.
    Config,
    /// Credentials rejected by the provider — permanent.
    Auth,
    /// I/O, network or throttling error — transient, may retry.
    Io,
    /// Anything else the provider reported.
    Logic,
}

impl ErrorKind {
    /// Whether an error of this kind is worth retrying.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::Io)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Auth => f.write_str("auth"),
            ErrorKind::Io => f.write_str("io"),
            ErrorKind::Logic => f.write_str("logic"),
        }
    }
}

/// Unified error type for `QueueClient` implementations.
///
/// Carries an `ErrorKind` for categorization and a human-readable message.
/// Provider crates map their SDK errors onto a kind; the pipeline only
/// looks at `is_transient()`.
#[derive(Clone)]
pub struct ProviderError {
    kind: ErrorKind,
    message: String,
}

impl ProviderError {
    /// Configuration error — permanent.
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    /// Authorization error — permanent.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Auth, message: msg.into() }
    }

    /// I/O error — transient, may retry.
    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self { kind, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl std::fmt::Debug for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for ProviderError {}
