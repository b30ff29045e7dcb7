//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The native library could not be found or opened
    #[error("Failed to load library '{library}': {reason}")]
    LibraryLoad { library: String, reason: String },

    /// The native library loaded but does not export a required symbol
    #[error("Library '{library}' does not export '{symbol}'")]
    UnresolvedSymbol { library: String, symbol: String },

    /// Library name is not a bare shared-object name
    #[error("Invalid library name: {0}")]
    InvalidLibraryName(String),

    /// The window insets API is not available on this platform level
    #[error("Window insets controller unavailable: {0}")]
    InsetsUnavailable(String),

    /// A JNI call failed or threw a Java exception
    #[error("JNI call failed: {0}")]
    Jni(String),

    /// Platform not supported on this OS
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl PlatformError {
    /// Whether this error ends the activity.
    ///
    /// Load failures propagate as-is; everything the immersive enforcer hits is
    /// downgraded to a no-op.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlatformError::LibraryLoad { .. } | PlatformError::UnresolvedSymbol { .. }
        )
    }
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
