//! Error types for the log pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Inner renderer could not produce a line
    #[error("Render error ({format_type}): {message}")]
    RenderError {
        format_type: String,
        message: String,
    },

    /// Partition directory could not be created
    #[error("Failed to create log directory '{path}': {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Log file could not be opened for appending
    #[error("Failed to open log file '{path}': {source}")]
    FileOpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bytes could not be written to a sink
    #[error("Write to '{target}' failed: {source}")]
    WriteError {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Writer was closed (for example by `close_all` on shutdown)
    #[error("Writer '{target}' is closed")]
    WriterClosed { target: String },

    /// A sink panicked while rendering or writing
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Global logger installed twice
    #[error("Global logger already initialized")]
    AlreadyInitialized,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a render error
    pub fn render(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::RenderError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a directory creation error
    pub fn directory(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::DirectoryError {
            path: path.into(),
            source,
        }
    }

    /// Create a file open error
    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileOpenError {
            path: path.into(),
            source,
        }
    }

    /// Create a write error
    pub fn write(target: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::WriteError {
            target: target.into(),
            source,
        }
    }

    /// Create a writer closed error
    pub fn writer_closed(target: impl Into<String>) -> Self {
        LoggerError::WriterClosed {
            target: target.into(),
        }
    }

    /// Create a sink panic error
    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the inner renderer rather than the I/O path
    #[must_use]
    pub fn is_render_error(&self) -> bool {
        matches!(self, LoggerError::RenderError { .. } | LoggerError::JsonError(_))
    }
}
