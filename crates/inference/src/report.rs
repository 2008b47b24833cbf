use core_types::EvidenceLevel;
use serde::{Deserialize, Serialize};

/// The complete result of a one-sample t-test on a return series.
///
/// This struct is the final output of the `InferenceEngine` and serves as the
/// data transfer object for inference results throughout the entire system.
/// It holds every intermediate quantity a presentation layer may want to
/// display, so nothing downstream ever needs to recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceReport {
    // I. Sample Statistics
    /// Number of observations in the series.
    pub n: usize,
    /// Sample mean of the returns.
    pub mean: f64,
    /// Sample standard deviation (Bessel-corrected, divisor n - 1).
    pub std: f64,
    /// Standard error of the mean: std / sqrt(n).
    pub standard_error: f64,

    // II. Hypothesis Test (H₀: true mean return = 0)
    /// The t-statistic: mean / standard_error.
    pub t_statistic: f64,
    /// Degrees of freedom of the t-distribution: n - 1.
    pub degrees_of_freedom: usize,
    /// Two-sided p-value: 2 * (1 - CDF_t(|t|, df)).
    pub p_value: f64,
    /// Significance level: 1 - confidence_level.
    pub alpha: f64,

    // III. Confidence Interval
    /// Two-sided critical t-value at 1 - alpha/2 with df degrees of freedom.
    pub critical_t: f64,
    /// Half-width of the confidence interval: critical_t * standard_error.
    pub margin_of_error: f64,
    /// Lower confidence bound: mean - margin_of_error.
    pub ci_low: f64,
    /// Upper confidence bound: mean + margin_of_error.
    pub ci_high: f64,

    // IV. Verdict
    /// True iff p_value < alpha.
    pub reject_null: bool,
    /// Editorial strength of the evidence against H₀.
    pub evidence: EvidenceLevel,
}

/// One bin of the return histogram, paired with the fitted normal density.
///
/// `empirical_density` is a density rather than a raw count, so the area
/// under the histogram and under the fitted curve are comparable on the same
/// y-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Midpoint of the bin's value range.
    pub bin_center: f64,
    /// count / (n * bin_width) for the observations falling in this bin.
    pub empirical_density: f64,
    /// Normal PDF evaluated at `bin_center` with the sample mean and std.
    pub fitted_density: f64,
}
