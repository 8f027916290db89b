use crate::errors::{PricingError, PricingResult};
use crate::params::{ensure_finite, ensure_non_negative, ensure_positive};

/// Exact GBM solution at time t for a single standard-normal draw:
///
/// S_T = S_0 * exp((r - sigma^2/2) * t + sigma * sqrt(t) * z)
///
/// Strictly positive and finite, or an error when the exponent leaves the
/// range where f64 `exp` neither underflows to 0 nor overflows to inf.
pub fn simulate_terminal_price(s0: f64, r: f64, sigma: f64, t: f64, z: f64) -> PricingResult<f64> {
    GbmStep::new(s0, r, sigma, t)?.apply(z)
}

/// Vectorized form: one terminal price per draw, same order, same length.
pub fn simulate_terminal_prices(
    s0: f64,
    r: f64,
    sigma: f64,
    t: f64,
    z: &[f64],
) -> PricingResult<Vec<f64>> {
    let step = GbmStep::new(s0, r, sigma, t)?;
    z.iter().map(|&zi| step.apply(zi)).collect()
}

/// Drift and diffusion terms precomputed once per batch.
#[derive(Debug, Clone, Copy)]
struct GbmStep {
    s0: f64,
    drift: f64,
    vol: f64,
}

impl GbmStep {
    fn new(s0: f64, r: f64, sigma: f64, t: f64) -> PricingResult<Self> {
        ensure_positive("s0", s0)?;
        ensure_finite("r", r)?;
        ensure_non_negative("sigma", sigma)?;
        ensure_non_negative("t", t)?;
        Ok(Self {
            s0,
            drift: (r - 0.5 * sigma * sigma) * t,
            vol: sigma * t.sqrt(),
        })
    }

    #[inline]
    fn apply(&self, z: f64) -> PricingResult<f64> {
        if !z.is_finite() {
            return Err(PricingError::Domain(format!("standard-normal draw must be finite, got {z}")));
        }
        let exponent = self.drift + self.vol * z;
        let s = self.s0 * exponent.exp();
        if !s.is_finite() || s <= 0.0 {
            return Err(PricingError::Domain(format!(
                "GBM exponent drift + vol*z = {exponent} (drift {}, vol {}, z {z}) is outside f64 range",
                self.drift, self.vol
            )));
        }
        Ok(s)
    }
}
