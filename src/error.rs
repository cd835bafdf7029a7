use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum WatchError {
    #[error("catalog request failed: {0}")]
    CatalogHttp(String),

    #[error("failed to decode catalog response: {0}")]
    CatalogDecode(String),

    #[error("watch list store error: {0}")]
    Store(String),

    #[error("failed to decode watch list record {key}: {message}")]
    StoreDecode { key: String, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to deliver reply: {0}")]
    Delivery(String),

    #[error("invalid slash command: {0}")]
    #[diagnostic(help("commands look like `/watch <dataset_id>`"))]
    InvalidCommand(String),
}
