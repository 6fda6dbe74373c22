//! Propagate the inner solar system over one year.
//!
//! Usage
//! -----
//! ```text
//! cargo run --example inner_planets -- [CATALOGUE.toml] [STEP_DAYS] [OUTPUT.csv]
//! ```
//!
//! * Without a catalogue the built-in Sun/Mercury/Venus/Earth/Mars preset is used.
//! * `STEP_DAYS` defaults to 1 day; the year is sampled on `[0, 364]`.
//! * Trajectories go to `OUTPUT.csv` (default `inner_planets.csv`).
//!
//! Set `RUST_LOG=cosmos=debug` to follow the catalogue and sampling steps.
use std::{env, fs::File, io::BufWriter, process::ExitCode};

use cosmos::catalogue::{solar_system, Catalogue};
use cosmos::display::PositionsTable;
use cosmos::star_system::StarSystem;
use cosmos::trajectory::{write_trajectories_csv, TimeGrid};
use cosmos::CosmosError;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_OUTPUT: &str = "inner_planets.csv";

fn load_system(catalogue: Option<&str>) -> Result<StarSystem, CosmosError> {
    match catalogue {
        Some(path) => Catalogue::from_file(path)?.into_star_system(),
        None => solar_system(),
    }
}

fn parse_step(arg: Option<&str>) -> Result<f64, CosmosError> {
    arg.map_or(Ok(1.0), |s| {
        s.parse::<f64>()
            .map_err(|err| CosmosError::InvalidTimeGrid(format!("invalid step '{s}': {err}")))
    })
}

fn run(args: &[String]) -> Result<(), CosmosError> {
    let system = load_system(args.first().map(String::as_str))?;
    let step = parse_step(args.get(1).map(String::as_str))?;
    let output = args.get(2).map_or(DEFAULT_OUTPUT, String::as_str);

    for (id, body) in system.bodies() {
        let depth = std::iter::successors(system.parent_of(id), |p| system.parent_of(*p)).count();
        println!("{}{body}", "  ".repeat(depth));
    }
    println!();

    for t in [0.0, 91.3, 182.6, 273.9] {
        println!("{}", PositionsTable::new(&system, t)?);
    }

    let grid = TimeGrid::new(0.0, 364.0, step)?;
    let trajectories = system.sample_trajectories(&grid)?;
    let writer = BufWriter::new(File::create(output)?);
    write_trajectories_csv(&trajectories, writer)?;
    info!(
        output,
        bodies = trajectories.len(),
        samples = grid.len(),
        "trajectories written"
    );
    println!("Trajectories written to {output}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
