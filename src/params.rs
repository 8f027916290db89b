use crate::errors::{PricingError, PricingResult};

// ── Market parameters ──

/// Inputs shared by every pricing call. Immutable, stack-allocated, Copy.
///
/// Construct through [`MarketParams::new`] so that every downstream
/// computation can assume `s0 > 0`, `k > 0`, `sigma >= 0`, `t >= 0` and
/// finite values everywhere.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[repr(C)]
pub struct MarketParams {
    pub s0: f64,    // Spot price today
    pub r: f64,     // Continuously compounded risk-free rate
    pub sigma: f64, // Annualized volatility
    pub t: f64,     // Time to maturity in years
    pub k: f64,     // Strike
}

impl MarketParams {
    pub fn new(s0: f64, r: f64, sigma: f64, t: f64, k: f64) -> PricingResult<Self> {
        let params = Self { s0, r, sigma, t, k };
        params.validate()?;
        Ok(params)
    }

    /// Re-check the invariants. Fields are public, so anything built with a
    /// struct literal goes through this before it is priced.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("s0", self.s0)?;
        ensure_finite("r", self.r)?;
        ensure_non_negative("sigma", self.sigma)?;
        ensure_non_negative("t", self.t)?;
        ensure_positive("k", self.k)?;
        Ok(())
    }

    #[inline]
    pub fn sqrt_t(&self) -> f64 {
        self.t.sqrt()
    }

    #[inline]
    pub fn sigma_sqrt_t(&self) -> f64 {
        self.sigma * self.t.sqrt()
    }

    /// e^{-r t}
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }

    /// Payoff if exercised against the spot right now.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        (self.s0 - self.k).max(0.0)
    }

    pub fn with_s0(self, s0: f64) -> PricingResult<Self> {
        Self::new(s0, self.r, self.sigma, self.t, self.k)
    }

    pub fn with_sigma(self, sigma: f64) -> PricingResult<Self> {
        Self::new(self.s0, self.r, sigma, self.t, self.k)
    }

    pub fn with_r(self, r: f64) -> PricingResult<Self> {
        Self::new(self.s0, r, self.sigma, self.t, self.k)
    }

    pub fn with_t(self, t: f64) -> PricingResult<Self> {
        Self::new(self.s0, self.r, self.sigma, t, self.k)
    }

    pub fn with_k(self, k: f64) -> PricingResult<Self> {
        Self::new(self.s0, self.r, self.sigma, self.t, k)
    }
}

pub(crate) fn ensure_finite(name: &str, value: f64) -> PricingResult<()> {
    if !value.is_finite() {
        return Err(PricingError::Domain(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> PricingResult<()> {
    ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(PricingError::Domain(format!("{name} must be > 0, got {value}")));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> PricingResult<()> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(PricingError::Domain(format!("{name} must be >= 0, got {value}")));
    }
    Ok(())
}
