// feedforge-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(feedforge::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- TABULAR INPUT / OUTPUT ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(feedforge::infra::csv),
        help("Check the delimiter and that every row has the same number of columns as the header.")
    )]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(feedforge::infra::json))]
    Json(#[from] serde_json::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(feedforge::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(feedforge::infra::config_missing))]
    ConfigNotFound(String),

    // --- FEED FILES ---
    #[error("Unsupported feed file '{0}'")]
    #[diagnostic(
        code(feedforge::infra::feed_kind),
        help("Expected one of: .jsonl, .jsonl.gz, .json, .tsv, .csv")
    )]
    UnsupportedFeed(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(code(feedforge::infra::template))]
    TemplateError(#[from] minijinja::Error),
}

// Lets loaders use `with_context` and still return the infrastructure error type.
impl From<anyhow::Error> for InfrastructureError {
    fn from(err: anyhow::Error) -> Self {
        InfrastructureError::ConfigError(format!("{:#}", err))
    }
}
