use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depsel operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepselError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration (`Depsel.toml`, settings file).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check Depsel.toml and ~/.depsel/settings.toml for syntax errors"))]
    Config { message: String },

    /// A POM file could not be read or parsed.
    #[error("POM error: {message}")]
    #[diagnostic(help("Check that pom.xml is well-formed XML"))]
    Pom { message: String },

    /// Dependency resolution failed. Fatal for the whole selection pass.
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
