use thiserror::Error;

/// The main error type for wasmdev operations
#[derive(Error, Debug)]
pub enum WasmdevError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory not found
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// Server errors
    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Server-related errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// No free port in the probed window
    #[error("No available port in range {first}-{last}, all are in use")]
    NoAvailablePort { first: u16, last: u16 },

    /// The OS refused the selected port
    #[error("Failed to bind server on port {port}: {reason}")]
    BindFailed { port: u16, reason: String },

    /// Signal handler registration failed
    #[error("Failed to install shutdown signal handler: {reason}")]
    SignalSetup { reason: String },

    /// The accept loop died outside of an intentional shutdown
    #[error("Server listener failed: {reason}")]
    ListenerFault { reason: String },
}

/// Result type alias for wasmdev operations
pub type Result<T> = std::result::Result<T, WasmdevError>;

impl WasmdevError {
    /// directory not found error
    pub fn directory_not_found(path: impl Into<String>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }
}

impl ServerError {
    /// new no available port error
    pub fn no_available_port(first: u16, last: u16) -> Self {
        Self::NoAvailablePort { first, last }
    }

    /// new bind failed error
    pub fn bind_failed(port: u16, reason: impl Into<String>) -> Self {
        Self::BindFailed {
            port,
            reason: reason.into(),
        }
    }

    /// new signal setup error
    pub fn signal_setup(reason: impl Into<String>) -> Self {
        Self::SignalSetup {
            reason: reason.into(),
        }
    }

    /// new listener fault error
    pub fn listener_fault(reason: impl Into<String>) -> Self {
        Self::ListenerFault {
            reason: reason.into(),
        }
    }
}
