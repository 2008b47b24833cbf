use crate::error::SimulationError;
use core_types::Period;
use rand::Rng;
use std::f64::consts::PI;

/// The per-run volatility of the simulated asset (1.5% per period).
pub const DEFAULT_VOLATILITY: f64 = 0.015;

/// Parameters for one Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of periodic samples to fabricate.
    pub days: usize,
    /// Constant drift added to every sample.
    pub drift: f64,
    /// Scale applied to the standard-normal draws.
    pub volatility: f64,
}

impl GeneratorConfig {
    /// Builds the configuration the laboratory uses for a simulated run:
    /// the period's trading-day count, a small random drift centered just
    /// above zero, and fixed volatility.
    pub fn for_period<R: Rng>(period: Period, rng: &mut R) -> Self {
        Self {
            days: period.trading_days(),
            drift: (rng.random::<f64>() - 0.48) * 0.002,
            volatility: DEFAULT_VOLATILITY,
        }
    }
}

/// Fabricates a return series of `config.days` samples of
/// `drift + volatility * Z`.
///
/// # Errors
///
/// `InvalidParameter` if `days` is zero or `volatility` is negative or
/// non-finite.
pub fn generate<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<f64>, SimulationError> {
    if config.days == 0 {
        return Err(SimulationError::InvalidParameter(
            "day count must be at least 1".to_string(),
        ));
    }
    if !config.volatility.is_finite() || config.volatility < 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "volatility must be finite and non-negative, got {}",
            config.volatility
        )));
    }
    if !config.drift.is_finite() {
        return Err(SimulationError::InvalidParameter(format!(
            "drift must be finite, got {}",
            config.drift
        )));
    }

    let mut returns = Vec::with_capacity(config.days);
    for _ in 0..config.days {
        returns.push(config.drift + config.volatility * standard_normal(rng));
    }

    tracing::debug!(
        days = config.days,
        drift = config.drift,
        volatility = config.volatility,
        "simulated return series generated"
    );

    Ok(returns)
}

/// One standard-normal variate via the Box-Muller transform.
///
/// The uniforms are re-drawn when exactly zero: ln(0) would produce -inf.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let mut u = 0.0;
    while u == 0.0 {
        u = rng.random::<f64>();
    }
    let mut v = 0.0;
    while v == 0.0 {
        v = rng.random::<f64>();
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sample_count_follows_the_period() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = GeneratorConfig::for_period(Period::SixMonths, &mut rng);
        assert_eq!(config.days, 126);
        assert_eq!(generate(&config, &mut rng).unwrap().len(), 126);

        let config = GeneratorConfig::for_period(Period::OneYear, &mut rng);
        assert_eq!(config.days, 252);
        assert_eq!(generate(&config, &mut rng).unwrap().len(), 252);
    }

    #[test]
    fn fixed_seed_reproduces_the_series() {
        let config = GeneratorConfig {
            days: 64,
            drift: 0.0005,
            volatility: 0.015,
        };
        let a = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        let c = generate(&config, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn samples_track_drift_and_volatility() {
        let config = GeneratorConfig {
            days: 10_000,
            drift: 0.001,
            volatility: 0.015,
        };
        let returns = generate(&config, &mut StdRng::seed_from_u64(1)).unwrap();

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let std = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();

        // 0.015 / sqrt(10_000) = 1.5e-4 is one standard error of the mean;
        // allow five of them. The seed is fixed, so this cannot flake.
        assert!((mean - 0.001).abs() < 7.5e-4, "sample mean {mean}");
        assert!((std - 0.015).abs() < 0.0015, "sample std {std}");
    }

    #[test]
    fn per_run_drift_is_small_and_bounded() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let config = GeneratorConfig::for_period(Period::SixMonths, &mut rng);
            // (U - 0.48) * 0.002 with U in [0, 1).
            assert!(config.drift >= -0.48 * 0.002);
            assert!(config.drift < 0.52 * 0.002);
            assert_eq!(config.volatility, DEFAULT_VOLATILITY);
        }
    }

    #[test]
    fn zero_volatility_collapses_to_pure_drift() {
        let config = GeneratorConfig {
            days: 20,
            drift: 0.002,
            volatility: 0.0,
        };
        let returns = generate(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert!(returns.iter().all(|&r| r == 0.002));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let zero_days = GeneratorConfig {
            days: 0,
            drift: 0.0,
            volatility: 0.015,
        };
        assert!(generate(&zero_days, &mut rng).is_err());

        let negative_vol = GeneratorConfig {
            days: 10,
            drift: 0.0,
            volatility: -0.01,
        };
        assert!(generate(&negative_vol, &mut rng).is_err());
    }
}
