pub mod black_scholes;
pub mod gbm;
pub mod monte_carlo;

use crate::errors::PricingResult;
use crate::params::MarketParams;

/// All call pricers implement this trait.
/// price() must be deterministic: same params, same answer. Monte Carlo
/// pricers get there by reseeding on every call.
pub trait CallPricer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Present value of a European call on `params`. Never returns NaN.
    fn price(&self, params: &MarketParams) -> PricingResult<f64>;
}
