use bsm_pricer::analysis::convergence::ConvergenceReport;
use bsm_pricer::analysis::histogram::Histogram;
use bsm_pricer::analysis::sweep::SweepReport;
use bsm_pricer::errors::PricingResult;
use bsm_pricer::{McEstimate, MarketParams};
use std::fmt::Write as _;

/// Widest histogram bar in text output.
const BAR_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, serde::Serialize)]
pub struct PricerRow {
    pub model: &'static str,
    pub price: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct PriceReport {
    pub params: MarketParams,
    pub rows: Vec<PricerRow>,
    pub monte_carlo: McEstimate,
    pub delta: f64,
    pub vega: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct SimulationReport {
    pub params: MarketParams,
    pub estimate: McEstimate,
    pub histogram: Histogram,
}

/// Print `report` as pretty JSON or through the text renderer.
pub fn emit<T: serde::Serialize>(
    format: OutputFormat,
    report: &T,
    render: fn(&T) -> String,
) -> PricingResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{}", render(report)),
    }
    Ok(())
}

fn params_line(p: &MarketParams) -> String {
    format!(
        "S0={} r={} sigma={} T={} K={}\n",
        p.s0, p.r, p.sigma, p.t, p.k
    )
}

pub fn render_price(report: &PriceReport) -> String {
    let mut out = params_line(&report.params);
    for row in &report.rows {
        let _ = writeln!(out, "{:<14} {:>12.5}", row.model, row.price);
    }
    let mc = &report.monte_carlo;
    let _ = writeln!(
        out,
        "MC std error   {:>12.5}  95% CI [{:.5}, {:.5}]  paths={}",
        mc.std_error, mc.ci_low, mc.ci_high, mc.paths
    );
    let _ = writeln!(out, "delta          {:>12.5}", report.delta);
    let _ = writeln!(out, "vega           {:>12.5}", report.vega);
    out
}

pub fn render_simulation(report: &SimulationReport) -> String {
    let mut out = params_line(&report.params);
    let h = &report.histogram;
    let _ = writeln!(
        out,
        "terminal prices: n={} min={:.4} mean={:.4} max={:.4}",
        h.total, h.min, h.mean, h.max
    );
    let _ = writeln!(
        out,
        "MC call price {:.5} (se {:.5})",
        report.estimate.price, report.estimate.std_error
    );

    let peak = h.counts.iter().copied().max().unwrap_or(0).max(1);
    for (edge, &count) in h.edges.windows(2).zip(&h.counts) {
        let bar = (count as usize * BAR_WIDTH) / peak as usize;
        let _ = writeln!(
            out,
            "[{:>10.3}, {:>10.3}) {:>7} {}",
            edge[0],
            edge[1],
            count,
            "#".repeat(bar)
        );
    }
    out
}

pub fn render_sweep(report: &SweepReport) -> String {
    let mut out = params_line(&report.base);
    let _ = writeln!(
        out,
        "{:>10} {:>12} {:>12} {:>10}",
        report.param.to_string(),
        "closed-form",
        "monte-carlo",
        "mc-se"
    );
    for p in &report.points {
        let _ = writeln!(
            out,
            "{:>10.4} {:>12.5} {:>12.5} {:>10.5}",
            p.value, p.closed_form, p.monte_carlo.price, p.monte_carlo.std_error
        );
    }
    out
}

pub fn render_convergence(report: &ConvergenceReport) -> String {
    let mut out = params_line(&report.params);
    let _ = writeln!(out, "closed form {:.6}", report.closed_form);
    let _ = writeln!(
        out,
        "{:>10} {:>12} {:>10} {:>10} {:>8} {:>8}",
        "paths", "mc-price", "se", "abs-err", "z", "in-ci"
    );
    for p in &report.points {
        let _ = writeln!(
            out,
            "{:>10} {:>12.6} {:>10.6} {:>10.6} {:>8.2} {:>8}",
            p.paths, p.price, p.std_error, p.abs_error, p.z_score, p.covered
        );
    }
    out
}
