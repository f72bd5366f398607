//! Error types for the Nebula GFX backend contract
//!
//! This module defines the error types used throughout the contract crate
//! and its backend implementations. Most backend operations are
//! fire-and-forget on success; the error channel carries the failure kind
//! so callers can distinguish caller mistakes from device-level failures.

use std::fmt;

/// Result type for backend contract operations
pub type GfxResult<T> = Result<T, GfxError>;

/// Backend contract errors
#[derive(Debug, Clone)]
pub enum GfxError {
    /// The native device was lost or removed; all handles are invalid
    /// and the backend must be rebuilt
    DeviceLost,

    /// Out of device memory
    OutOfMemory,

    /// Caller contract violation (bad handle, out-of-range update,
    /// streaming calls out of order)
    InvalidArgument(String),

    /// Operation or format not supported by this backend
    Unsupported(String),

    /// Backend or context construction failed
    InitializationFailed(String),
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GfxError::DeviceLost => write!(f, "Device lost"),
            GfxError::OutOfMemory => write!(f, "Out of device memory"),
            GfxError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            GfxError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            GfxError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for GfxError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
