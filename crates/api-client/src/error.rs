use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the data provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The data provider returned an error: {0}")]
    Provider(String),

    #[error("Failed to deserialize the provider response: {0}")]
    Deserialization(String),

    #[error("Invalid data from provider: {0}")]
    InvalidData(String),
}
