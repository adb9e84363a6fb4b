//! Post-hoc KPI computation from simulation results.

use std::fmt;

use super::types::TickResult;

/// Aggregate indicators derived from a complete simulation run.
///
/// Computed post-hoc from `Vec<TickResult>` so the report always agrees
/// with the recorded tick data.
#[derive(Debug, Clone)]
pub struct KpiReport {
    /// Highest single-substation load seen across the run (MW).
    pub peak_load_mw: f32,
    /// Identifier of the substation where the peak occurred.
    pub peak_load_substation: String,
    /// Sum of per-tick train demand (MW-ticks).
    pub total_demand_mw: f32,
    /// Sum of per-tick allocated power (MW-ticks).
    pub total_allocated_mw: f32,
    /// Sum of per-tick unserved demand (MW-ticks).
    pub total_unserved_mw: f32,
    /// Ticks during which at least one substation was congested.
    pub congestion_ticks: usize,
    /// Total (tick, substation) congestion observations.
    pub congestion_events: usize,
    /// Total (tick, train) out-of-range observations.
    pub out_of_range_events: usize,
}

impl KpiReport {
    /// Computes all indicators from the complete tick record vector.
    pub fn from_results(results: &[TickResult]) -> Self {
        let mut peak_load_mw = 0.0_f32;
        let mut peak_load_substation = String::new();
        let mut total_demand_mw = 0.0_f32;
        let mut total_allocated_mw = 0.0_f32;
        let mut total_unserved_mw = 0.0_f32;
        let mut congestion_ticks = 0_usize;
        let mut congestion_events = 0_usize;
        let mut out_of_range_events = 0_usize;

        for r in results {
            total_demand_mw += r.demand_mw;
            total_allocated_mw += r.allocated_mw;
            total_unserved_mw += r.unserved_mw;
            out_of_range_events += r.out_of_range_trains;

            if r.congested_substations > 0 {
                congestion_ticks += 1;
            }
            congestion_events += r.congested_substations;

            for load in &r.substation_loads {
                if load.load_mw > peak_load_mw {
                    peak_load_mw = load.load_mw;
                    peak_load_substation = load.id.clone();
                }
            }
        }

        Self {
            peak_load_mw,
            peak_load_substation,
            total_demand_mw,
            total_allocated_mw,
            total_unserved_mw,
            congestion_ticks,
            congestion_events,
            out_of_range_events,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        if self.peak_load_substation.is_empty() {
            writeln!(f, "Peak substation load:  {:.2} MW", self.peak_load_mw)?;
        } else {
            writeln!(
                f,
                "Peak substation load:  {:.2} MW ({})",
                self.peak_load_mw, self.peak_load_substation
            )?;
        }
        writeln!(f, "Total demand:          {:.2} MW-ticks", self.total_demand_mw)?;
        writeln!(
            f,
            "Total allocated:       {:.2} MW-ticks",
            self.total_allocated_mw
        )?;
        writeln!(
            f,
            "Total unserved:        {:.2} MW-ticks",
            self.total_unserved_mw
        )?;
        writeln!(
            f,
            "Congested ticks:       {} ({} substation events)",
            self.congestion_ticks, self.congestion_events
        )?;
        write!(f, "Out-of-range events:   {}", self.out_of_range_events)
    }
}
