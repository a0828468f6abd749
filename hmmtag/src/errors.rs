//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized Result type for hmmtag.
pub type Result<T, E = TaggerError> = std::result::Result<T, E>;

/// The error type for hmmtag.
#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    /// The error variant for [`LoadError`].
    #[error(transparent)]
    Load(LoadError),

    /// The error variant for [`ConfigError`].
    #[error(transparent)]
    Config(ConfigError),

    /// The error variant for [`CapacityExceededError`].
    #[error(transparent)]
    CapacityExceeded(CapacityExceededError),

    /// The error variant for [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`InvalidStateError`].
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// The error variant for [`std::io::Error`].
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// The error variant for [`rkyv::rancor::Error`].
    #[error(transparent)]
    Rkyv(#[from] rkyv::rancor::Error),
}

impl TaggerError {
    pub(crate) fn load<S, M>(source: S, line: Option<usize>, msg: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::Load(LoadError {
            source: source.into(),
            line,
            msg: msg.into(),
        })
    }

    pub(crate) fn config<S, M>(key: S, msg: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::Config(ConfigError {
            key: key.into(),
            msg: msg.into(),
        })
    }

    pub(crate) const fn capacity_exceeded(
        resource: &'static str,
        limit: usize,
        requested: usize,
    ) -> Self {
        Self::CapacityExceeded(CapacityExceededError {
            resource,
            limit,
            requested,
        })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

/// Error used when a statistics table cannot be opened or parsed.
#[derive(Debug)]
pub struct LoadError {
    /// Path or name of the table source.
    pub(crate) source: String,

    /// 1-based line number of the offending record, if any.
    pub(crate) line: Option<usize>,

    /// Error message.
    pub(crate) msg: String,
}

impl LoadError {
    /// Gets the 1-based line number of the offending record.
    pub const fn line(&self) -> Option<usize> {
        self.line
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "LoadError: {}:{}: {}", self.source, line, self.msg),
            None => write!(f, "LoadError: {}: {}", self.source, self.msg),
        }
    }
}

impl Error for LoadError {}

/// Error used when the tagger configuration is incomplete.
#[derive(Debug)]
pub struct ConfigError {
    /// Name of the configuration key.
    pub(crate) key: String,

    /// Error message.
    pub(crate) msg: String,
}

impl ConfigError {
    /// Gets the configuration key that caused the error.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ConfigError: {}: {}", self.key, self.msg)
    }
}

impl Error for ConfigError {}

/// Error used when a sentence does not fit into the lattice.
#[derive(Debug)]
pub struct CapacityExceededError {
    /// Name of the exhausted arena.
    pub(crate) resource: &'static str,

    /// Configured ceiling.
    pub(crate) limit: usize,

    /// Number of slots the sentence asked for.
    pub(crate) requested: usize,
}

impl CapacityExceededError {
    /// Gets the configured ceiling.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Gets the number of slots the sentence asked for.
    pub const fn requested(&self) -> usize {
        self.requested
    }
}

impl fmt::Display for CapacityExceededError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CapacityExceededError: {}: requested {} but the limit is {}",
            self.resource, self.requested, self.limit
        )
    }
}

impl Error for CapacityExceededError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the state is invalid.
#[derive(Debug)]
pub struct InvalidStateError {
    /// Error message.
    pub(crate) msg: String,

    /// Underlying cause of the error.
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}
