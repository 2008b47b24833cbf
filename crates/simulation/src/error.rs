use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid simulation parameter: {0}")]
    InvalidParameter(String),
}
