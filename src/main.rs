mod output;

use bsm_pricer::analysis::convergence::run_convergence;
use bsm_pricer::analysis::histogram::Histogram;
use bsm_pricer::analysis::sweep::{run_sweep, SweepParam};
use bsm_pricer::config::AppConfig;
use bsm_pricer::errors::PricingResult;
use bsm_pricer::models::gbm::simulate_terminal_prices;
use bsm_pricer::models::monte_carlo::mc_call_price_from_terminal;
use bsm_pricer::{
    bsm_call_delta, bsm_call_vega, BlackScholesCall, CallPricer, MarketParams, MonteCarloCall,
    NormalSource, SeededNormals,
};
use clap::{Args, Parser, Subcommand};
use output::{OutputFormat, PriceReport, PricerRow, SimulationReport};

/// Black-Scholes-Merton European call pricing
#[derive(Parser)]
#[command(name = "bsm-pricer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    market: MarketArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,
}

/// Flags override BSM_* environment variables.
#[derive(Args, Debug)]
struct MarketArgs {
    /// Spot price today
    #[arg(long, global = true)]
    spot: Option<f64>,
    /// Risk-free rate (continuous)
    #[arg(long, global = true)]
    rate: Option<f64>,
    /// Annualized volatility
    #[arg(long, global = true)]
    sigma: Option<f64>,
    /// Time to maturity in years
    #[arg(long, global = true)]
    maturity: Option<f64>,
    /// Strike price
    #[arg(long, global = true)]
    strike: Option<f64>,
    /// Monte Carlo path count
    #[arg(long, global = true)]
    paths: Option<usize>,
    /// RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl MarketArgs {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(v) = self.spot {
            cfg.spot = v;
        }
        if let Some(v) = self.rate {
            cfg.rate = v;
        }
        if let Some(v) = self.sigma {
            cfg.sigma = v;
        }
        if let Some(v) = self.maturity {
            cfg.maturity = v;
        }
        if let Some(v) = self.strike {
            cfg.strike = v;
        }
        if let Some(v) = self.paths {
            cfg.paths = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Price the call with the closed form and with Monte Carlo
    Price,
    /// Simulate terminal prices and summarize their distribution
    Simulate {
        /// Histogram bin count
        #[arg(long)]
        bins: Option<usize>,
    },
    /// Reprice across a range of one input
    Sweep {
        /// Input to vary
        #[arg(long, value_enum)]
        param: SweepParam,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 11)]
        steps: usize,
    },
    /// Monte Carlo error against the closed form for doubling path counts
    Convergence {
        #[arg(long, default_value_t = 1_000)]
        start: usize,
        #[arg(long, default_value_t = 256_000)]
        max_paths: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };
    cli.market.apply(&mut cfg);

    if let Err(e) = run(cli.command, &cfg, cli.output) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command, cfg: &AppConfig, format: OutputFormat) -> PricingResult<()> {
    let params = cfg.market_params()?;
    tracing::info!(
        s0 = params.s0,
        r = params.r,
        sigma = params.sigma,
        t = params.t,
        k = params.k,
        "market parameters"
    );

    match command {
        Command::Price => {
            let report = price_report(&params, cfg.paths, cfg.seed)?;
            tracing::info!(paths = cfg.paths, seed = cfg.seed, "priced call");
            output::emit(format, &report, output::render_price)
        }

        Command::Simulate { bins } => {
            let bins = bins.unwrap_or(cfg.bins);
            let mut source = SeededNormals::new(cfg.seed);
            let z = source.standard_normal(cfg.paths);
            let terminal = simulate_terminal_prices(params.s0, params.r, params.sigma, params.t, &z)?;
            let report = SimulationReport {
                params,
                estimate: mc_call_price_from_terminal(&params, &terminal)?,
                histogram: Histogram::from_samples(&terminal, bins)?,
            };
            tracing::info!(paths = terminal.len(), seed = source.seed(), bins, "simulated terminal prices");
            output::emit(format, &report, output::render_simulation)
        }

        Command::Sweep { param, from, to, steps } => {
            let mc = MonteCarloCall::new(cfg.paths, cfg.seed);
            let report = run_sweep(&params, param, from, to, steps, &mc)?;
            tracing::info!(param = %param, steps, "sweep finished");
            output::emit(format, &report, output::render_sweep)
        }

        Command::Convergence { start, max_paths } => {
            let report = run_convergence(&params, start, max_paths, cfg.seed)?;
            tracing::info!(levels = report.points.len(), "convergence study finished");
            output::emit(format, &report, output::render_convergence)
        }
    }
}

/// Closed form and Monte Carlo side by side. The simulation runs once and
/// feeds both the MC row and the error statistics.
fn price_report(params: &MarketParams, paths: usize, seed: u64) -> PricingResult<PriceReport> {
    let bs = BlackScholesCall::new();
    let mc = MonteCarloCall::new(paths, seed);
    let estimate = mc.estimate(params)?;

    Ok(PriceReport {
        params: *params,
        rows: vec![
            PricerRow {
                model: bs.name(),
                price: bs.price(params)?,
            },
            PricerRow {
                model: mc.name(),
                price: estimate.price,
            },
        ],
        monte_carlo: estimate,
        delta: bsm_call_delta(params)?,
        vega: bsm_call_vega(params)?,
    })
}
