use crate::errors::{PricingError, PricingResult};
use crate::models::gbm::simulate_terminal_prices;
use crate::models::CallPricer;
use crate::params::MarketParams;
use crate::sampling::{NormalSource, SeededNormals};
use statrs::statistics::Statistics;

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.959_963_984_540_054;

/// Below this many paths the standard error is too noisy to mean much.
const FEW_PATHS_WARNING: usize = 100;

/// Monte Carlo price with its sampling uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct McEstimate {
    pub price: f64,
    pub std_error: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub paths: usize,
}

impl McEstimate {
    /// True when `value` falls inside the 95% confidence interval.
    #[inline]
    pub fn covers(&self, value: f64) -> bool {
        value >= self.ci_low && value <= self.ci_high
    }
}

/// Monte Carlo European call.
///
/// 1. Draw `n` standard normals from `source`.
/// 2. Map them to terminal prices under GBM.
/// 3. Payoff max(S_i - K, 0) per path.
/// 4. Discount the mean payoff by e^{-rT}.
pub fn mc_call_price<S: NormalSource + ?Sized>(
    params: &MarketParams,
    n: usize,
    source: &mut S,
) -> PricingResult<McEstimate> {
    params.validate()?;
    if n == 0 {
        return Err(PricingError::InvalidPathCount(0));
    }
    if n < FEW_PATHS_WARNING {
        tracing::warn!(paths = n, "very few Monte Carlo paths, estimate will be noisy");
    }

    let z = source.standard_normal(n);
    let terminal = simulate_terminal_prices(params.s0, params.r, params.sigma, params.t, &z)?;
    mc_call_price_from_terminal(params, &terminal)
}

/// Same estimator, starting from already simulated terminal prices.
/// Only `k`, `r` and `t` of `params` are used.
pub fn mc_call_price_from_terminal(
    params: &MarketParams,
    terminal: &[f64],
) -> PricingResult<McEstimate> {
    params.validate()?;
    if terminal.is_empty() {
        return Err(PricingError::InvalidPathCount(0));
    }
    if let Some(bad) = terminal.iter().find(|s| !s.is_finite() || **s <= 0.0) {
        return Err(PricingError::Domain(format!("terminal price must be finite and > 0, got {bad}")));
    }

    let k = params.k;
    let payoffs: Vec<f64> = terminal.iter().map(|&s| (s - k).max(0.0)).collect();
    let n = payoffs.len();

    let df = params.discount_factor();
    let price = df * payoffs.iter().mean();
    let std_error = if n > 1 {
        df * payoffs.iter().std_dev() / (n as f64).sqrt()
    } else {
        0.0
    };

    tracing::debug!(paths = n, price, std_error, "monte carlo call price");

    Ok(McEstimate {
        price,
        std_error,
        ci_low: (price - Z_95 * std_error).max(0.0),
        ci_high: price + Z_95 * std_error,
        paths: n,
    })
}

/// Monte Carlo pricer behind the [`CallPricer`] seam.
/// Reseeds on every call so repeated pricing of the same params agrees.
pub struct MonteCarloCall {
    pub paths: usize,
    pub seed: u64,
}

impl MonteCarloCall {
    pub fn new(paths: usize, seed: u64) -> Self {
        Self { paths, seed }
    }

    pub fn estimate(&self, params: &MarketParams) -> PricingResult<McEstimate> {
        let mut source = SeededNormals::new(self.seed);
        mc_call_price(params, self.paths, &mut source)
    }
}

impl CallPricer for MonteCarloCall {
    #[inline]
    fn name(&self) -> &'static str {
        "Monte Carlo"
    }

    fn price(&self, params: &MarketParams) -> PricingResult<f64> {
        self.estimate(params).map(|e| e.price)
    }
}
