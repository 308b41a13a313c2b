//! Error types for pagewise
//!
//! This module defines the error taxonomy for the engine.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The engine never retries and never logs-and-swallows: every failure is
//! returned to the consumer at the exact pull that triggered it, and the
//! sequence that produced it yields nothing further.

use thiserror::Error;

/// Boxed source error carried by [`Error::Transport`].
///
/// Whatever the injected transport fails with is passed through unchanged;
/// retry and backoff policy belong to the transport, not to this engine.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for pagewise
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying `issue` call failed (network, auth, server error).
    ///
    /// The source error is propagated unmodified. No partial page is
    /// observable when this is returned.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// A caller-supplied argument was rejected, e.g. a fixed page size of
    /// zero.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// The listing call behaved inconsistently, e.g. the service handed
    /// back a page token that was already consumed, which would loop
    /// forever if followed.
    #[error("protocol violation: {message}")]
    ProtocolViolation {
        /// What the call did wrong
        message: String,
    },

    /// The consumer cancelled the listing while a fetch was in flight.
    #[error("listing cancelled")]
    Cancelled,
}

impl Error {
    /// Wrap a transport failure
    pub fn transport(source: impl Into<TransportError>) -> Self {
        Self::Transport(source.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a protocol violation error
    pub fn protocol_violation(message: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            message: message.into(),
        }
    }

    /// Check if this error came from the transport
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for pagewise
pub type Result<T> = std::result::Result<T, Error>;
