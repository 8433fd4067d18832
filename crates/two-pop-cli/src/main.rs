//! Command-line runner for the two-population dust model.
//!
//! Every parameter has a flag in convenient units; unset flags keep the
//! reference values. Results are always written to `--dir`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use units::{Length, Mass, Time};

use two_pop::{run_model, ParameterValue, Parameters, RunOptions, TwoPopModel};

#[derive(Parser, Debug)]
#[command(
    name = "two-pop",
    version,
    about = "Two-population dust evolution in a viscously evolving disk"
)]
struct Args {
    /// Number of radial grid cells
    #[arg(long)]
    nr: Option<u32>,

    /// Number of snapshots
    #[arg(long)]
    nt: Option<u32>,

    /// Number of grain sizes in the reconstructed distribution
    #[arg(long)]
    na: Option<u32>,

    /// Simulation end time [years]
    #[arg(long)]
    tmax: Option<f64>,

    /// Turbulence parameter
    #[arg(long)]
    alpha: Option<f64>,

    /// Initial dust-to-gas ratio
    #[arg(long)]
    d2g: Option<f64>,

    /// Stellar mass [solar masses]
    #[arg(long)]
    mstar: Option<f64>,

    /// Stellar effective temperature [K]
    #[arg(long)]
    tstar: Option<f64>,

    /// Stellar radius [solar radii]
    #[arg(long)]
    rstar: Option<f64>,

    /// Initial characteristic radius [AU]
    #[arg(long)]
    rc: Option<f64>,

    /// Initial disk mass [stellar masses]
    #[arg(long)]
    mdisk: Option<f64>,

    /// Grain bulk density [g/cm^3]
    #[arg(long)]
    rhos: Option<f64>,

    /// Fragmentation velocity [cm/s]
    #[arg(long)]
    vfrag: Option<f64>,

    /// Monomer grain size [cm]
    #[arg(long)]
    a0: Option<f64>,

    /// Viscosity exponent
    #[arg(long)]
    gamma: Option<f64>,

    /// Drift limit efficiency
    #[arg(long)]
    edrift: Option<f64>,

    /// Output directory
    #[arg(long)]
    dir: Option<String>,

    /// Plot the results
    #[arg(short, long)]
    plot: bool,

    /// Keep the gas surface density fixed
    #[arg(short = 'g', long)]
    no_gasevol: bool,
}

impl Args {
    /// Flags that were given, converted to cgs.
    fn parameter_values(&self) -> Vec<(&'static str, ParameterValue)> {
        let defaults = Parameters::default();
        let mstar = self.mstar.map(|m| Mass::from_solar_masses(m).to_grams());
        // Disk mass is given relative to the star and follows it when unset
        let mdisk = (self.mstar.is_some() || self.mdisk.is_some()).then(|| {
            let fraction = self.mdisk.unwrap_or(defaults.mdisk / defaults.mstar);
            fraction * mstar.unwrap_or(defaults.mstar)
        });

        let count = |n: Option<u32>| n.map(|n| ParameterValue::Integer(i64::from(n)));
        let float = |v: Option<f64>| v.map(ParameterValue::Float);

        let values = [
            ("nr", count(self.nr)),
            ("nt", count(self.nt)),
            ("na", count(self.na)),
            ("tmax", float(self.tmax.map(|t| Time::from_years(t).to_seconds()))),
            ("alpha", float(self.alpha)),
            ("d2g", float(self.d2g)),
            ("mstar", float(mstar)),
            ("tstar", float(self.tstar)),
            ("rstar", float(self.rstar.map(|r| Length::from_solar_radii(r).to_cm()))),
            ("rc", float(self.rc.map(|r| Length::from_au(r).to_cm()))),
            ("mdisk", float(mdisk)),
            ("rhos", float(self.rhos)),
            ("vfrag", float(self.vfrag)),
            ("a0", float(self.a0)),
            ("gamma", float(self.gamma)),
            ("edrift", float(self.edrift)),
            ("gasevol", self.no_gasevol.then_some(ParameterValue::Boolean(false))),
            ("dir", self.dir.clone().map(ParameterValue::Text)),
        ];

        values
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let parameters =
        Parameters::from_values(args.parameter_values()).context("invalid parameters")?;

    let options = RunOptions {
        save: true,
        plot: args.plot,
    };
    let results = run_model(&parameters, &TwoPopModel::default(), None, &options)
        .with_context(|| format!("run writing to `{}` failed", parameters.dir))?;

    info!(
        dir = %parameters.dir,
        snapshots = results.n_times(),
        reconstructed = results.size_distribution.is_some(),
        "done"
    );
    Ok(())
}
