// feedforge-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Record has no product id")]
    #[diagnostic(
        code(feedforge::domain::missing_id),
        help("Every catalog row needs a non-empty 'id' column.")
    )]
    MissingIdentity,

    #[error("Schema Error: {0}")]
    #[diagnostic(code(feedforge::domain::schema))]
    SchemaError(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(feedforge::domain::config),
        help("Check the seller, return_windows and shopping sections of feedforge.yaml.")
    )]
    InvalidConfig(String),

    #[error("Unknown feed format '{0}'")]
    #[diagnostic(
        code(feedforge::domain::format),
        help("Supported formats: assistant, shopping.")
    )]
    UnknownFormat(String),

    #[error("The {format} feed cannot be written as {encoding}")]
    #[diagnostic(
        code(feedforge::domain::encoding),
        help("Assistant feeds are written as JSON lines (.jsonl or .jsonl.gz).")
    )]
    UnsupportedEncoding { format: String, encoding: String },
}
