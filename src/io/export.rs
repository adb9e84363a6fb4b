//! CSV export for simulation tick results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickResult;

/// Column header for CSV telemetry export, one row per (tick, substation).
const HEADER: &str = "tick,substation_id,load_mw,max_power_mw,congested,\
                      tick_demand_mw,tick_allocated_mw,tick_unserved_mw,tick_out_of_range";

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per substation per
/// tick. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[TickResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[TickResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        for sub in &r.substation_loads {
            wtr.write_record(&[
                r.tick.to_string(),
                sub.id.clone(),
                format!("{:.4}", sub.load_mw),
                format!("{:.4}", sub.max_power_mw),
                sub.congested.to_string(),
                format!("{:.4}", r.demand_mw),
                format!("{:.4}", r.allocated_mw),
                format!("{:.4}", r.unserved_mw),
                r.out_of_range_trains.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
