pub mod convergence;
pub mod histogram;
pub mod sweep;
