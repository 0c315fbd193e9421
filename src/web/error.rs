use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Internal Server Error")]
    Internal,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// A rejected store call, the message is shown to the user as is
    #[error("{0}")]
    Store(String),
}

impl Error {
    pub fn store(e: anyhow::Error) -> Self {
        Error::Store(e.to_string())
    }
}
