use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Not enough data to perform inference: {0}")]
    NotEnoughData(String),

    #[error("Confidence level must lie strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),

    #[error("Return series contains a non-finite value at index {0}")]
    NonFiniteReturn(usize),

    #[error("Calculation error: Division by zero encountered in '{0}'")]
    DivisionByZero(String),

    #[error("Degenerate return series: {0}")]
    DegenerateDomain(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
