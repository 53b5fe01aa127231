//! Precompile error types

use gateway_crypto::Selector;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that terminate a precompile call.
///
/// None of these are retried; the dispatcher hands them back to the host
/// unchanged together with the gas left at the point of failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// String does not fit a single 32-byte slot
    #[error("cannot pack string of {len} bytes (max 32)")]
    ArgumentTooLong {
        /// Byte length of the rejected string
        len: usize,
    },

    /// Input shorter than the fixed part of the layout
    #[error("input too short: need at least {required} bytes, got {got}")]
    InputTooShort {
        /// Minimum length
        required: usize,
        /// Actual length
        got: usize,
    },

    /// Length word larger than u64
    #[error("declared string length does not fit in u64")]
    LengthNotRepresentable,

    /// Single-slot string longer than 32 bytes
    #[error("declared string length {0} exceeds 32 bytes")]
    LengthOutOfRange(u64),

    /// Input length disagrees with the declared string length
    #[error("input had unexpected length {got} with string length declared as {declared}")]
    LengthMismatch {
        /// Declared string length
        declared: u64,
        /// Actual input length
        got: usize,
    },

    /// Head/tail offset or length points outside the input
    #[error("argument {argument} points outside input of {input_len} bytes")]
    OffsetOutOfRange {
        /// Zero-based argument index
        argument: usize,
        /// Input length
        input_len: usize,
    },

    /// String payload is not UTF-8
    #[error("string argument is not valid utf-8")]
    InvalidUtf8,

    /// Supplied gas below the operation cost
    #[error("out of gas")]
    OutOfGas,

    /// Input too short to carry a selector
    #[error("missing function selector: input length {0}")]
    MissingSelector(usize),

    /// No handler registered for the selector
    #[error("unknown function selector 0x{}", hex::encode(.0))]
    UnknownSelector(Selector),

    /// Two handlers registered under one selector
    #[error("duplicate function selector 0x{}", hex::encode(.0))]
    DuplicateSelector(Selector),

    /// State write attempted in a read-only call
    #[error("state modification in read-only call")]
    WriteProtection,

    /// Content identifier empty after sanitizing
    #[error("invalid content identifier")]
    InvalidIdentifier,

    /// Content fetch failed (transport, status, size or deadline)
    #[error("fetch failed: {0}")]
    FetchFailed(String),
}

/// Result type for precompile operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Semantically invalid setting
    #[error("invalid config: {0}")]
    Invalid(String),

    /// Contract construction failed
    #[error("contract construction failed: {0}")]
    Contract(#[from] GatewayError),
}
