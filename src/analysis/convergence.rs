use crate::errors::{PricingError, PricingResult};
use crate::models::black_scholes::bsm_call_price;
use crate::models::monte_carlo::mc_call_price;
use crate::params::MarketParams;
use crate::sampling::SeededNormals;
use smallvec::SmallVec;

/// One row of a convergence study.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ConvergencePoint {
    pub paths: usize,
    pub price: f64,
    pub std_error: f64,
    pub abs_error: f64,
    /// |MC - closed form| in units of the standard error
    pub z_score: f64,
    /// Closed form inside the 95% confidence interval
    pub covered: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ConvergenceReport {
    pub params: MarketParams,
    pub closed_form: f64,
    pub points: SmallVec<[ConvergencePoint; 16]>,
}

/// Price with Monte Carlo at `start`, `2*start`, `4*start`, ... up to
/// `max_paths`, each level on a fresh generator seeded with `seed`.
pub fn run_convergence(
    params: &MarketParams,
    start: usize,
    max_paths: usize,
    seed: u64,
) -> PricingResult<ConvergenceReport> {
    if start == 0 {
        return Err(PricingError::InvalidPathCount(0));
    }
    if max_paths < start {
        return Err(PricingError::Domain(format!(
            "max paths ({max_paths}) must be >= starting paths ({start})"
        )));
    }

    let closed_form = bsm_call_price(params)?;
    let mut points = SmallVec::new();

    let mut n = start;
    while n <= max_paths {
        let est = mc_call_price(params, n, &mut SeededNormals::new(seed))?;
        let abs_error = (est.price - closed_form).abs();
        let z_score = if est.std_error > 0.0 { abs_error / est.std_error } else { 0.0 };

        tracing::debug!(paths = n, price = est.price, abs_error, "convergence level");

        points.push(ConvergencePoint {
            paths: n,
            price: est.price,
            std_error: est.std_error,
            abs_error,
            z_score,
            covered: est.covers(closed_form),
        });

        n = match n.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(ConvergenceReport {
        params: *params,
        closed_form,
        points,
    })
}
