use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid tab index {index} (tab count: {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source template error: {0}")]
    Template(String),

    #[error("Refresh failed: {0}")]
    Refresh(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
