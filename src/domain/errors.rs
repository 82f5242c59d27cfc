//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. An unknown slug is not an
//! error (repositories return `Ok(None)`), and neither is a missing joined
//! relation; see `domain::relations`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// The repository read itself failed (connection, query, decoding).
    #[error("Repository error: {0}")]
    Repo(String),

    #[error("Page sink error: {0}")]
    Sink(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

