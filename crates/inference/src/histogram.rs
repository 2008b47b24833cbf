use crate::error::InferenceError;
use crate::report::HistogramBin;
use statrs::distribution::{Continuous, Normal};

/// The bin count used by the laboratory's chart.
pub const DEFAULT_BIN_COUNT: usize = 30;

/// Bins a return series over `[min, max]` and pairs each bin's empirical
/// density with the fitted normal density at the bin center.
///
/// `mean` and `std` are the sample statistics already computed by the
/// `InferenceEngine`; they are passed in rather than recomputed so the two
/// outputs can never disagree.
///
/// Binning policy: bins are half-open `[start, end)`, except that the final
/// bin includes its upper bound so the maximum observation is counted
/// instead of silently dropped.
///
/// # Errors
///
/// * `NotEnoughData` - the series is empty.
/// * `Calculation` - `bin_count` is zero.
/// * `NonFiniteReturn` - the series contains NaN or infinity.
/// * `DivisionByZero` - `std` is not strictly positive.
/// * `DegenerateDomain` - every observation is identical, so the bin width
///   would be zero. Callers wanting a "single spike" rendering must handle
///   this case themselves.
pub fn build_histogram(
    returns: &[f64],
    mean: f64,
    std: f64,
    bin_count: usize,
) -> Result<Vec<HistogramBin>, InferenceError> {
    if returns.is_empty() {
        return Err(InferenceError::NotEnoughData(
            "cannot bin an empty return series".to_string(),
        ));
    }
    if bin_count == 0 {
        return Err(InferenceError::Calculation(
            "bin count must be at least 1".to_string(),
        ));
    }
    if let Some(idx) = returns.iter().position(|r| !r.is_finite()) {
        return Err(InferenceError::NonFiniteReturn(idx));
    }
    if std <= 0.0 {
        return Err(InferenceError::DivisionByZero("fitted_density".to_string()));
    }

    let domain_min = returns.iter().copied().fold(f64::INFINITY, f64::min);
    let domain_max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if domain_max == domain_min {
        return Err(InferenceError::DegenerateDomain(format!(
            "all {} observations equal {}; bin width would be zero",
            returns.len(),
            domain_min
        )));
    }

    let bin_width = (domain_max - domain_min) / bin_count as f64;
    let n = returns.len() as f64;
    let normal = Normal::new(mean, std)
        .map_err(|e| InferenceError::Calculation(e.to_string()))?;

    let mut bins = Vec::with_capacity(bin_count);
    for i in 0..bin_count {
        // Both edges come from the same expression so that bin i's upper
        // bound is bit-identical to bin i+1's lower bound. Computing the
        // upper edge as bin_start + bin_width instead leaves a one-ulp gap
        // (or overlap) at interior boundaries, and an observation landing
        // there would be counted in zero bins (or two).
        let bin_start = domain_min + i as f64 * bin_width;
        let bin_end = domain_min + (i + 1) as f64 * bin_width;
        let bin_center = (bin_start + bin_end) / 2.0;
        let last = i == bin_count - 1;

        // The final bin has no upper-bound check: nothing in the series lies
        // beyond domain_max, and comparing against an accumulated bin_end
        // could lose the maximum to rounding.
        let count = returns
            .iter()
            .filter(|&&r| r >= bin_start && (last || r < bin_end))
            .count();

        bins.push(HistogramBin {
            bin_center,
            empirical_density: count as f64 / (n * bin_width),
            fitted_density: normal.pdf(bin_center),
        });
    }

    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InferenceEngine;

    /// A small non-degenerate series with an exactly known layout.
    const RETURNS: [f64; 5] = [0.01, 0.02, -0.01, 0.015, 0.005];

    fn fitted_stats(returns: &[f64]) -> (f64, f64) {
        let report = InferenceEngine::new().calculate(returns, 0.95).unwrap();
        (report.mean, report.std)
    }

    #[test]
    fn produces_the_requested_number_of_ordered_bins() {
        let (mean, std) = fitted_stats(&RETURNS);
        let bins = build_histogram(&RETURNS, mean, std, DEFAULT_BIN_COUNT).unwrap();
        assert_eq!(bins.len(), 30);
        for pair in bins.windows(2) {
            assert!(pair[0].bin_center < pair[1].bin_center);
        }
    }

    #[test]
    fn empirical_density_integrates_to_one() {
        let (mean, std) = fitted_stats(&RETURNS);
        let bins = build_histogram(&RETURNS, mean, std, DEFAULT_BIN_COUNT).unwrap();

        let bin_width = (0.02 - (-0.01)) / 30.0;
        let area: f64 = bins.iter().map(|b| b.empirical_density * bin_width).sum();
        assert!(
            (area - 1.0).abs() < 1e-9,
            "histogram area should be ~1, got {area}"
        );
    }

    #[test]
    fn maximum_observation_lands_in_the_last_bin() {
        let (mean, std) = fitted_stats(&RETURNS);
        let bins = build_histogram(&RETURNS, mean, std, DEFAULT_BIN_COUNT).unwrap();

        // 0.02 is the domain maximum; with half-open bins everywhere it
        // would vanish. The inclusive last bin must count it.
        let bin_width = (0.02 - (-0.01)) / 30.0;
        let last = bins.last().unwrap();
        assert!(last.empirical_density > 0.0);
        assert!(
            (last.empirical_density - 1.0 / (5.0 * bin_width)).abs() < 1e-9,
            "last bin should hold exactly one of five observations"
        );
    }

    #[test]
    fn every_observation_is_counted_exactly_once() {
        let returns: Vec<f64> = (0..100).map(|i| -0.03 + 0.0007 * i as f64).collect();
        let (mean, std) = fitted_stats(&returns);
        let bins = build_histogram(&returns, mean, std, 13).unwrap();

        let min = returns.first().copied().unwrap();
        let max = returns.last().copied().unwrap();
        let bin_width = (max - min) / 13.0;
        let total: f64 = bins
            .iter()
            .map(|b| b.empirical_density * returns.len() as f64 * bin_width)
            .sum();
        assert!(
            (total - returns.len() as f64).abs() < 1e-6,
            "expected {} observations across all bins, got {total}",
            returns.len()
        );
    }

    #[test]
    fn boundary_values_land_in_exactly_one_bin() {
        // 31 evenly spaced observations over 30 bins put every interior
        // observation exactly on a bin edge. Each one must be counted in
        // precisely one bin; a mismatch between one bin's upper edge and
        // the next bin's lower edge loses (or doubles) them.
        let returns: Vec<f64> = (0..=30).map(|i| -0.015 + 0.001 * i as f64).collect();
        let (mean, std) = fitted_stats(&returns);
        let bins = build_histogram(&returns, mean, std, 30).unwrap();

        let bin_width = (0.015 - (-0.015)) / 30.0;
        let total: f64 = bins
            .iter()
            .map(|b| b.empirical_density * returns.len() as f64 * bin_width)
            .sum();
        assert!(
            (total - 31.0).abs() < 1e-9,
            "expected all 31 boundary observations counted, got {total}"
        );

        let area: f64 = bins.iter().map(|b| b.empirical_density * bin_width).sum();
        assert!((area - 1.0).abs() < 1e-9, "histogram area should be ~1, got {area}");
    }

    #[test]
    fn fitted_density_peaks_near_the_mean() {
        let returns: Vec<f64> = (0..50)
            .map(|i| 0.001 * ((i % 11) as f64 - 5.0))
            .collect();
        let (mean, std) = fitted_stats(&returns);
        let bins = build_histogram(&returns, mean, std, DEFAULT_BIN_COUNT).unwrap();

        let peak = bins
            .iter()
            .max_by(|a, b| a.fitted_density.total_cmp(&b.fitted_density))
            .unwrap();
        assert!(
            (peak.bin_center - mean).abs() <= (bins[1].bin_center - bins[0].bin_center),
            "normal PDF should peak within one bin of the mean"
        );
    }

    #[test]
    fn degenerate_domain_is_an_error_not_a_nan() {
        let result = build_histogram(&[0.004; 6], 0.004, 0.001, DEFAULT_BIN_COUNT);
        assert!(matches!(result, Err(InferenceError::DegenerateDomain(_))));
    }

    #[test]
    fn empty_series_and_zero_bins_are_rejected() {
        assert!(matches!(
            build_histogram(&[], 0.0, 0.01, 30),
            Err(InferenceError::NotEnoughData(_))
        ));
        assert!(matches!(
            build_histogram(&RETURNS, 0.008, 0.0115, 0),
            Err(InferenceError::Calculation(_))
        ));
    }

    #[test]
    fn non_positive_std_is_rejected() {
        assert!(matches!(
            build_histogram(&RETURNS, 0.008, 0.0, 30),
            Err(InferenceError::DivisionByZero(_))
        ));
    }
}
