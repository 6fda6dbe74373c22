//! # Trajectory sampling and export
//!
//! Helpers to evaluate positions over a regular time grid and hand the samples to a
//! presentation layer (plotting tool, spreadsheet, …):
//!
//! - [`TimeGrid`]: validated `start..=end` range with a fixed `step`.
//! - [`sample_trajectory`]: positions of one set of elements over a grid.
//! - [`StarSystem::sample_trajectories`]: absolute trajectories of every body of a system.
//! - [`Trajectory::write_csv`] / [`write_trajectories_csv`]: CSV export with columns
//!   `body,t,x,y,z`.
//! - [`parse_epoch`] / [`days_between`]: calendar dates to propagation times, via `hifitime`.
//!
//! Sampling is sequential and deterministic; each sample is an independent call into the
//! pure propagator.
use std::{io::Write, str::FromStr};

use hifitime::Epoch;
use serde::Serialize;
use tracing::debug;

use crate::{
    constants::{Position, MAX_TIME_GRID_SAMPLES, SECONDS_PER_DAY},
    cosmos_errors::CosmosError,
    orbital_elements::OrbitalElements,
    propagator::KeplerPropagator,
    star_system::StarSystem,
};

/// Regular sampling of the closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    end: f64,
    step: f64,
    samples: usize,
}

impl TimeGrid {
    /// Errors
    /// ------
    /// * [`CosmosError::InvalidTimeGrid`] if a bound is not finite, `end < start`,
    ///   `step` is not a positive finite number, or the grid would hold more than
    ///   [`MAX_TIME_GRID_SAMPLES`] samples.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, CosmosError> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(CosmosError::InvalidTimeGrid(format!(
                "bounds must be finite, got [{start}, {end}]"
            )));
        }
        if end < start {
            return Err(CosmosError::InvalidTimeGrid(format!(
                "end ({end}) must not precede start ({start})"
            )));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(CosmosError::InvalidTimeGrid(format!(
                "step must be a positive number, got {step}"
            )));
        }

        // both bounds included when `end - start` is a multiple of `step`
        let intervals = ((end - start) / step + 1e-9).floor();
        if !(intervals.is_finite() && intervals < MAX_TIME_GRID_SAMPLES as f64) {
            return Err(CosmosError::InvalidTimeGrid(format!(
                "step {step} over [{start}, {end}] exceeds {MAX_TIME_GRID_SAMPLES} samples"
            )));
        }
        let samples = intervals as usize + 1;

        Ok(TimeGrid {
            start,
            end,
            step,
            samples,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples, at least one and at most [`MAX_TIME_GRID_SAMPLES`].
    pub fn len(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Sample times `start + k·step`, computed without accumulating rounding errors.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |k| self.start + k as f64 * self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub t: f64,
    pub position: Position,
}

/// Time-ordered positions of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub name: String,
    pub samples: Vec<TrajectorySample>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    body: &'a str,
    t: f64,
    x: f64,
    y: f64,
    z: f64,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    pub fn x(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position.x).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position.y).collect()
    }

    pub fn z(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position.z).collect()
    }

    /// Write the samples as CSV (`body,t,x,y,z`, header included).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CosmosError> {
        write_trajectories_csv(std::slice::from_ref(self), writer)
    }

    fn serialize_rows<W: Write>(
        &self,
        csv_writer: &mut csv::Writer<W>,
    ) -> Result<(), CosmosError> {
        for sample in &self.samples {
            csv_writer.serialize(CsvRow {
                body: &self.name,
                t: sample.t,
                x: sample.position.x,
                y: sample.position.y,
                z: sample.position.z,
            })?;
        }
        Ok(())
    }
}

/// Write several trajectories into a single CSV table, one header row.
pub fn write_trajectories_csv<W: Write>(
    trajectories: &[Trajectory],
    writer: W,
) -> Result<(), CosmosError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for trajectory in trajectories {
        trajectory.serialize_rows(&mut csv_writer)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Sample the position of `elements` at every time of `grid`.
///
/// The first failing sample aborts the whole trajectory; the error names the body and time.
pub fn sample_trajectory(
    name: &str,
    propagator: &KeplerPropagator,
    elements: &OrbitalElements,
    grid: &TimeGrid,
) -> Result<Trajectory, CosmosError> {
    let samples = grid
        .times()
        .map(|t| {
            propagator
                .position_at_time(elements, t)
                .map(|position| TrajectorySample { t, position })
                .map_err(|err| err.at_body(name, t))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trajectory {
        name: name.to_string(),
        samples,
    })
}

impl StarSystem {
    /// Absolute trajectories of every body of the system, in insertion order.
    pub fn sample_trajectories(&self, grid: &TimeGrid) -> Result<Vec<Trajectory>, CosmosError> {
        let trajectories = self
            .bodies()
            .map(|(id, body)| {
                let samples = grid
                    .times()
                    .map(|t| {
                        self.absolute_position_at_time(id, t)
                            .map(|position| TrajectorySample { t, position })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Trajectory {
                    name: body.name().to_string(),
                    samples,
                })
            })
            .collect::<Result<Vec<_>, CosmosError>>()?;

        debug!(
            system = %self.name(),
            bodies = trajectories.len(),
            samples = grid.len(),
            "trajectories sampled"
        );
        Ok(trajectories)
    }
}

/// Parse a calendar date understood by `hifitime` (e.g. `"2024-03-20T03:06:00 UTC"`).
pub fn parse_epoch(date: &str) -> Result<Epoch, CosmosError> {
    Epoch::from_str(date)
        .map_err(|err| CosmosError::InvalidTimeGrid(format!("invalid date '{date}': {err}")))
}

/// Elapsed time from `reference` to `epoch`, in days (negative when `epoch` is earlier).
pub fn days_between(reference: Epoch, epoch: Epoch) -> f64 {
    (epoch - reference).to_seconds() / SECONDS_PER_DAY
}
