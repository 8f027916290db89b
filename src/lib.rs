//! European call pricing under Black-Scholes-Merton, by Monte Carlo
//! simulation of terminal prices and by the closed-form formula.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod params;
pub mod sampling;

pub use errors::{PricingError, PricingResult};
pub use models::black_scholes::{bsm_call_delta, bsm_call_price, bsm_call_vega, BlackScholesCall};
pub use models::gbm::{simulate_terminal_price, simulate_terminal_prices};
pub use models::monte_carlo::{mc_call_price, mc_call_price_from_terminal, McEstimate, MonteCarloCall};
pub use models::CallPricer;
pub use params::MarketParams;
pub use sampling::{FixedNormals, NormalSource, SeededNormals};
