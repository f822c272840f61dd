//! Error types for netrm

use std::fmt;
use thiserror::Error;

/// A single unmet parameter precondition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    /// Parameter the failure belongs to
    pub parameter: &'static str,
    /// Human readable message
    pub message: String,
}

impl ArgumentError {
    /// Create new argument error
    pub fn new(parameter: &'static str, message: impl Into<String>) -> Self {
        Self {
            parameter,
            message: message.into(),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Every precondition a command found unmet, in check order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ArgumentError>);

impl ValidationErrors {
    /// Create empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn push(&mut self, parameter: &'static str, message: impl Into<String>) {
        self.0.push(ArgumentError::new(parameter, message));
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate failures
    pub fn iter(&self) -> impl Iterator<Item = &ArgumentError> {
        self.0.iter()
    }

    /// Failures recorded against one parameter
    pub fn for_parameter<'a>(&'a self, parameter: &'a str) -> impl Iterator<Item = &'a ArgumentError> {
        self.0.iter().filter(move |e| e.parameter == parameter)
    }

    /// `Ok(())` when empty, otherwise `InvalidArgument` carrying every failure
    pub fn into_result(self) -> NetrmResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(NetrmError::InvalidArgument(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// netrm error type
#[derive(Error, Debug)]
pub enum NetrmError {
    /// One or more parameters failed validation
    #[error("invalid argument: {0}")]
    InvalidArgument(ValidationErrors),

    /// Name lookup matched more than one entry
    #[error("more than one entry matches name {name:?} ({count} matches)")]
    AmbiguousMatch { name: String, count: usize },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Management API returned a failure status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No usable credentials
    #[error("authentication failed: {0}")]
    Auth(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetrmError {
    /// Single-failure `InvalidArgument`
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.push(parameter, message);
        Self::InvalidArgument(errors)
    }
}

/// Result type for netrm
pub type NetrmResult<T> = Result<T, NetrmError>;
