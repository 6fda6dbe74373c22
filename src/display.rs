//! Table rendering of a star system at a given time.
//!
//! [`PositionsTable`] evaluates the absolute position of every body and renders it with
//! [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/):
//!
//! ```text
//! ┌─────────┬────────┬────────┬─────────────┬─────────────┬──────────┬─────────────┐
//! │ Body    ┆ Type   ┆ Parent ┆ x           ┆ y           ┆ z        ┆ r           │
//! ╞═════════╪════════╪════════╪═════════════╪═════════════╪══════════╪═════════════╡
//! │ Sun     ┆ star   ┆ -      ┆ 0.000       ┆ 0.000       ┆ 0.000    ┆ 0.000       │
//! │ Earth   ┆ planet ┆ Sun    ┆ 147099846.… ┆ …           ┆ …        ┆ …           │
//! └─────────┴────────┴────────┴─────────────┴─────────────┴──────────┴─────────────┘
//! ```
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{constants::Position, cosmos_errors::CosmosError, star_system::StarSystem};

struct PositionRow {
    name: String,
    body_type: String,
    parent: String,
    position: Position,
}

/// Snapshot of the absolute positions of a system, ready to print.
pub struct PositionsTable {
    system: String,
    time: f64,
    rows: Vec<PositionRow>,
    precision: usize,
}

impl PositionsTable {
    /// Evaluate every body of `system` at time `t`.
    ///
    /// Errors are those of [`StarSystem::positions_at_time`].
    pub fn new(system: &StarSystem, t: f64) -> Result<Self, CosmosError> {
        let rows = system
            .positions_at_time(t)?
            .into_iter()
            .filter_map(|(id, position)| {
                let body = system.body(id)?;
                Some(PositionRow {
                    name: body.name().to_string(),
                    body_type: body.body_type().to_string(),
                    parent: body.parent().unwrap_or("-").to_string(),
                    position,
                })
            })
            .collect();

        Ok(PositionsTable {
            system: system.name().to_string(),
            time: t,
            rows,
            precision: 3,
        })
    }

    /// Number of fractional digits of the coordinate columns (default 3).
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Body", "Type", "Parent", "x", "y", "z", "r"]);

        let p = self.precision;
        for row in &self.rows {
            let pos = &row.position;
            let number = |v: f64| Cell::new(format!("{v:.p$}")).set_alignment(CellAlignment::Right);
            table.add_row(Row::from(vec![
                Cell::new(&row.name),
                Cell::new(&row.body_type),
                Cell::new(&row.parent),
                number(pos.x),
                number(pos.y),
                number(pos.z),
                number(pos.norm()),
            ]));
        }
        table
    }
}

impl fmt::Display for PositionsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} @ t = {}", self.system, self.time)?;
        write!(f, "{}", self.table())
    }
}
