use crate::errors::PricingResult;
use crate::models::CallPricer;
use crate::params::MarketParams;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Black-Scholes-Merton European call.
///
/// C = Phi(d1) * S - Phi(d2) * K * e^{-rT}
///
/// where d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// and   d2 = d1 - sigma * sqrt(T).
///
/// Degenerate cases: T = 0 returns intrinsic value max(S - K, 0); sigma = 0
/// with T > 0 returns the discounted forward payoff max(S - K e^{-rT}, 0).
pub fn bsm_call_price(params: &MarketParams) -> PricingResult<f64> {
    params.validate()?;

    if params.t == 0.0 {
        return Ok(params.intrinsic());
    }

    let df = params.discount_factor();
    let Some((d1, d2)) = d1_d2(params) else {
        return Ok((params.s0 - params.k * df).max(0.0));
    };

    let normal = standard_normal();
    let price = normal.cdf(d1) * params.s0 - normal.cdf(d2) * params.k * df;

    tracing::debug!(d1, d2, price, "closed-form call price");

    // Rounding can push deep OTM prices a hair below zero.
    Ok(price.max(0.0))
}

/// dC/dS = Phi(d1). Always in [0, 1].
pub fn bsm_call_delta(params: &MarketParams) -> PricingResult<f64> {
    params.validate()?;

    if params.t == 0.0 {
        return Ok(if params.s0 > params.k { 1.0 } else { 0.0 });
    }

    match d1_d2(params) {
        Some((d1, _)) => Ok(standard_normal().cdf(d1)),
        None => {
            let forward_itm = params.s0 > params.k * params.discount_factor();
            Ok(if forward_itm { 1.0 } else { 0.0 })
        }
    }
}

/// dC/dsigma = S * phi(d1) * sqrt(T). Never negative.
pub fn bsm_call_vega(params: &MarketParams) -> PricingResult<f64> {
    params.validate()?;

    match d1_d2(params) {
        Some((d1, _)) if params.t > 0.0 => {
            Ok(params.s0 * standard_normal().pdf(d1) * params.sqrt_t())
        }
        _ => Ok(0.0),
    }
}

/// None when sigma * sqrt(T) is zero and d1 is undefined.
#[inline]
fn d1_d2(params: &MarketParams) -> Option<(f64, f64)> {
    let sigma_sqrt_t = params.sigma_sqrt_t();
    if sigma_sqrt_t < 1e-12 {
        return None;
    }
    let ln_s_k = (params.s0 / params.k).ln();
    let d1 = (ln_s_k + (params.r + 0.5 * params.sigma * params.sigma) * params.t) / sigma_sqrt_t;
    Some((d1, d1 - sigma_sqrt_t))
}

#[inline]
fn standard_normal() -> Normal {
    Normal::standard()
}

/// Closed-form pricer behind the [`CallPricer`] seam.
pub struct BlackScholesCall;

impl BlackScholesCall {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BlackScholesCall {
    fn default() -> Self {
        Self::new()
    }
}

impl CallPricer for BlackScholesCall {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn price(&self, params: &MarketParams) -> PricingResult<f64> {
        bsm_call_price(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> MarketParams {
        MarketParams::new(100.0, 0.03, 0.4, 0.25, 105.0).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let p = bsm_call_price(&reference()).unwrap();
        assert!((p - 6.197850).abs() < 1e-5, "price={p} should be ~6.19785");
    }

    #[test]
    fn test_zero_maturity_is_intrinsic() {
        let itm = MarketParams::new(110.0, 0.05, 0.3, 0.0, 100.0).unwrap();
        let otm = MarketParams::new(90.0, 0.05, 0.3, 0.0, 100.0).unwrap();
        assert_eq!(bsm_call_price(&itm).unwrap(), 10.0);
        assert_eq!(bsm_call_price(&otm).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_vol_is_discounted_forward() {
        let p = MarketParams::new(100.0, 0.05, 0.0, 1.0, 100.0).unwrap();
        let expected = 100.0 - 100.0 * (-0.05f64).exp();
        let price = bsm_call_price(&p).unwrap();
        assert!((price - expected).abs() < 1e-12, "price={price} expected={expected}");
    }

    #[test]
    fn test_struct_literal_still_validated() {
        let bad = MarketParams { s0: 100.0, r: 0.03, sigma: -0.4, t: 0.25, k: 105.0 };
        assert!(bsm_call_price(&bad).is_err());
        let bad_t = MarketParams { s0: 100.0, r: 0.03, sigma: 0.4, t: -0.25, k: 105.0 };
        assert!(bsm_call_price(&bad_t).is_err());
    }

    #[test]
    fn test_bounds() {
        // max(S - K e^{-rT}, 0) <= C <= S
        let p = reference();
        let c = bsm_call_price(&p).unwrap();
        let lower = (p.s0 - p.k * p.discount_factor()).max(0.0);
        assert!(c >= lower && c <= p.s0, "C={c} outside [{lower}, {}]", p.s0);
    }

    #[test]
    fn test_monotone_in_spot_and_vol() {
        let base = reference();
        let mut prev = 0.0;
        for s in (50..=150).step_by(5) {
            let c = bsm_call_price(&base.with_s0(s as f64).unwrap()).unwrap();
            assert!(c >= prev, "price fell from {prev} to {c} at S={s}");
            prev = c;
        }
        let mut prev = 0.0;
        for i in 0..=20 {
            let c = bsm_call_price(&base.with_sigma(i as f64 * 0.05).unwrap()).unwrap();
            assert!(c >= prev - 1e-12, "price fell from {prev} to {c} at sigma step {i}");
            prev = c;
        }
    }

    #[test]
    fn test_delta_and_vega_ranges() {
        let base = reference();
        for s in [40.0, 80.0, 100.0, 105.0, 130.0, 300.0] {
            let p = base.with_s0(s).unwrap();
            let delta = bsm_call_delta(&p).unwrap();
            let vega = bsm_call_vega(&p).unwrap();
            assert!((0.0..=1.0).contains(&delta), "delta={delta} at S={s}");
            assert!(vega >= 0.0, "vega={vega} at S={s}");
        }
        let delta = bsm_call_delta(&base).unwrap();
        assert!((delta - 0.457612).abs() < 1e-5, "delta={delta}");
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let base = reference();
        let h = 1e-4;
        let up = bsm_call_price(&base.with_s0(base.s0 + h).unwrap()).unwrap();
        let dn = bsm_call_price(&base.with_s0(base.s0 - h).unwrap()).unwrap();
        let fd = (up - dn) / (2.0 * h);
        let delta = bsm_call_delta(&base).unwrap();
        assert!((fd - delta).abs() < 1e-6, "fd={fd} delta={delta}");
    }

    #[test]
    fn test_pricer_trait() {
        let model = BlackScholesCall::new();
        assert_eq!(model.name(), "Black-Scholes");
        let p = model.price(&reference()).unwrap();
        assert!((p - bsm_call_price(&reference()).unwrap()).abs() < 1e-15);
    }
}
