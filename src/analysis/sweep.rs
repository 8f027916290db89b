use crate::errors::{PricingError, PricingResult};
use crate::models::black_scholes::bsm_call_price;
use crate::models::monte_carlo::{McEstimate, MonteCarloCall};
use crate::params::MarketParams;

/// Which market input a sweep varies. Everything else stays at the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SweepParam {
    Spot,
    Strike,
    Sigma,
    Rate,
    Maturity,
}

impl SweepParam {
    fn apply(self, base: MarketParams, value: f64) -> PricingResult<MarketParams> {
        match self {
            Self::Spot => base.with_s0(value),
            Self::Strike => base.with_k(value),
            Self::Sigma => base.with_sigma(value),
            Self::Rate => base.with_r(value),
            Self::Maturity => base.with_t(value),
        }
    }
}

impl std::fmt::Display for SweepParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spot => write!(f, "spot"),
            Self::Strike => write!(f, "strike"),
            Self::Sigma => write!(f, "sigma"),
            Self::Rate => write!(f, "rate"),
            Self::Maturity => write!(f, "maturity"),
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub closed_form: f64,
    pub monte_carlo: McEstimate,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepReport {
    pub param: SweepParam,
    pub base: MarketParams,
    pub points: Vec<SweepPoint>,
}

/// Reprice the call at `steps` evenly spaced values of `param` in [from, to],
/// with both the closed form and Monte Carlo. `steps == 1` prices `from` only.
pub fn run_sweep(
    base: &MarketParams,
    param: SweepParam,
    from: f64,
    to: f64,
    steps: usize,
    mc: &MonteCarloCall,
) -> PricingResult<SweepReport> {
    if steps == 0 {
        return Err(PricingError::Domain("sweep needs at least one step".into()));
    }
    if !from.is_finite() || !to.is_finite() {
        return Err(PricingError::Domain(format!("sweep range must be finite, got [{from}, {to}]")));
    }

    let step = if steps > 1 { (to - from) / (steps - 1) as f64 } else { 0.0 };

    let points = (0..steps)
        .map(|i| -> PricingResult<SweepPoint> {
            let value = if i + 1 == steps && steps > 1 { to } else { from + step * i as f64 };
            let params = param.apply(*base, value)?;
            Ok(SweepPoint {
                value,
                closed_form: bsm_call_price(&params)?,
                monte_carlo: mc.estimate(&params)?,
            })
        })
        .collect::<PricingResult<Vec<_>>>()?;

    tracing::debug!(param = %param, steps, "sweep complete");

    Ok(SweepReport {
        param,
        base: *base,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> MarketParams {
        MarketParams::new(100.0, 0.03, 0.4, 0.25, 105.0).unwrap()
    }

    #[test]
    fn test_spot_sweep_is_monotone() {
        let mc = MonteCarloCall::new(2_000, 5);
        let report = run_sweep(&reference(), SweepParam::Spot, 60.0, 140.0, 9, &mc).unwrap();
        assert_eq!(report.points.len(), 9);
        assert_eq!(report.points[0].value, 60.0);
        assert_eq!(report.points[8].value, 140.0);
        for w in report.points.windows(2) {
            assert!(w[1].closed_form >= w[0].closed_form, "closed form not monotone in spot");
        }
    }

    #[test]
    fn test_sigma_sweep_is_monotone() {
        let mc = MonteCarloCall::new(500, 5);
        let report = run_sweep(&reference(), SweepParam::Sigma, 0.05, 0.8, 6, &mc).unwrap();
        for w in report.points.windows(2) {
            assert!(w[1].closed_form >= w[0].closed_form, "closed form not monotone in sigma");
        }
    }

    #[test]
    fn test_single_step() {
        let mc = MonteCarloCall::new(100, 1);
        let report = run_sweep(&reference(), SweepParam::Strike, 90.0, 120.0, 1, &mc).unwrap();
        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0].value, 90.0);
    }

    #[test]
    fn test_invalid_range_propagates_domain_error() {
        let mc = MonteCarloCall::new(100, 1);
        assert!(run_sweep(&reference(), SweepParam::Sigma, -0.2, 0.4, 4, &mc).is_err());
        assert!(run_sweep(&reference(), SweepParam::Spot, 80.0, 120.0, 0, &mc).is_err());
        assert!(run_sweep(&reference(), SweepParam::Spot, f64::NAN, 120.0, 3, &mc).is_err());
    }
}
