//! Error types for scrollbar construction and mutation.

use thiserror::Error;

/// Errors reported by a host surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The node is not (or no longer) part of the surface.
    #[error("host node {0} does not exist")]
    UnknownNode(String),
    /// Another element holds the pointer.
    #[error("pointer is already captured by {0}")]
    CaptureHeld(String),
    /// Any other host-specific failure.
    #[error("host surface error: {0}")]
    Other(String),
}

impl From<tuidom::DocumentError> for HostError {
    fn from(err: tuidom::DocumentError) -> Self {
        match err {
            tuidom::DocumentError::UnknownElement(id) => Self::UnknownNode(id.to_string()),
            tuidom::DocumentError::CaptureHeld(id) => Self::CaptureHeld(id.to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Errors raised synchronously by scrollbar operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollbarError {
    /// A size was negative or not finite. State is left untouched.
    #[error("invalid {name}: {value} (sizes must be finite and non-negative)")]
    InvalidDimension { name: &'static str, value: f64 },
    /// The scrollbar was detached, or its elements were removed from the host.
    #[error("scrollbar is no longer attached to its host surface")]
    DetachedHost,
    #[error(transparent)]
    Host(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, ScrollbarError>;
