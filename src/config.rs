use crate::errors::{PricingError, PricingResult};
use crate::params::MarketParams;

/// Runtime configuration. Environment (and `.env`) first, CLI flags on top.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub spot: f64,
    pub rate: f64,
    pub sigma: f64,
    pub maturity: f64,
    pub strike: f64,
    pub paths: usize,
    pub seed: u64,
    pub bins: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.03,
            sigma: 0.4,
            maturity: 0.25,
            strike: 105.0,
            paths: 10_000,
            seed: 42,
            bins: 30,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> PricingResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> PricingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            spot: parse_or(&lookup, "BSM_SPOT", defaults.spot)?,
            rate: parse_or(&lookup, "BSM_RATE", defaults.rate)?,
            sigma: parse_or(&lookup, "BSM_SIGMA", defaults.sigma)?,
            maturity: parse_or(&lookup, "BSM_MATURITY", defaults.maturity)?,
            strike: parse_or(&lookup, "BSM_STRIKE", defaults.strike)?,
            paths: parse_or(&lookup, "BSM_PATHS", defaults.paths)?,
            seed: parse_or(&lookup, "BSM_SEED", defaults.seed)?,
            bins: parse_or(&lookup, "BSM_BINS", defaults.bins)?,
        })
    }

    pub fn market_params(&self) -> PricingResult<MarketParams> {
        MarketParams::new(self.spot, self.rate, self.sigma, self.maturity, self.strike)
            .map_err(|e| PricingError::Config(e.to_string()))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> PricingResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PricingError::Config(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
