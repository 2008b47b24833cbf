use crate::error::InferenceError;
use crate::report::InferenceReport;
use core_types::EvidenceLevel;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// A stateless calculator for testing a return series for significant drift.
///
/// The test performed is the classic one-sample t-test against the null
/// hypothesis that the true mean return is zero (no drift). It is not a
/// two-sample comparison.
#[derive(Debug, Default)]
pub struct InferenceEngine {}

impl InferenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for running the hypothesis test.
    ///
    /// # Arguments
    ///
    /// * `returns` - The ordered series of periodic fractional returns
    ///   (e.g., 0.0123 for +1.23%). At least 2 observations are required.
    /// * `confidence_level` - The confidence level for the interval,
    ///   strictly between 0 and 1 (e.g., 0.95).
    ///
    /// # Returns
    ///
    /// A `Result` containing the `InferenceReport` or an `InferenceError`.
    pub fn calculate(
        &self,
        returns: &[f64],
        confidence_level: f64,
    ) -> Result<InferenceReport, InferenceError> {
        self.validate(returns, confidence_level)?;

        let n = returns.len();
        let mean = returns.iter().sum::<f64>() / n as f64;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (n as f64 - 1.0);
        let std = variance.sqrt();

        // An all-identical series has zero standard error; the t-statistic
        // is undefined and must never be silently produced.
        if std == 0.0 {
            return Err(InferenceError::DivisionByZero(
                "standard_error".to_string(),
            ));
        }

        let standard_error = std / (n as f64).sqrt();
        let t_statistic = mean / standard_error;
        let degrees_of_freedom = n - 1;

        let t_dist = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
            .map_err(|e| InferenceError::Calculation(e.to_string()))?;

        // Two-sided test.
        let p_value = 2.0 * (1.0 - t_dist.cdf(t_statistic.abs()));
        let alpha = 1.0 - confidence_level;
        let critical_t = t_dist.inverse_cdf(1.0 - alpha / 2.0);
        let margin_of_error = critical_t * standard_error;

        let reject_null = p_value < alpha;
        let evidence = EvidenceLevel::from_p_value(p_value);

        tracing::debug!(
            n,
            t_statistic,
            p_value,
            reject_null,
            "one-sample t-test computed"
        );

        Ok(InferenceReport {
            n,
            mean,
            std,
            standard_error,
            t_statistic,
            degrees_of_freedom,
            p_value,
            alpha,
            critical_t,
            margin_of_error,
            ci_low: mean - margin_of_error,
            ci_high: mean + margin_of_error,
            reject_null,
            evidence,
        })
    }

    /// Rejects invalid input before any arithmetic runs.
    fn validate(&self, returns: &[f64], confidence_level: f64) -> Result<(), InferenceError> {
        if returns.len() < 2 {
            return Err(InferenceError::NotEnoughData(format!(
                "sample variance requires at least 2 observations, got {}",
                returns.len()
            )));
        }
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(InferenceError::InvalidConfidence(confidence_level));
        }
        if let Some(idx) = returns.iter().position(|r| !r.is_finite()) {
            return Err(InferenceError::NonFiniteReturn(idx));
        }
        Ok(())
    }
}
