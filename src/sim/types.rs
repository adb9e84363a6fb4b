//! Core simulation types: run configuration and per-tick records.

use std::fmt;

/// Global simulation run parameters.
///
/// # Examples
///
/// ```
/// use traction_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(3, 42);
/// assert_eq!(cfg.ticks, 3);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation ticks to run.
    pub ticks: usize,
    /// Master random seed for reproducible drive cycles.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a run configuration.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is zero.
    pub fn new(ticks: usize, seed: u64) -> Self {
        assert!(ticks > 0, "ticks must be > 0");
        Self { ticks, seed }
    }
}

/// Load observed at one substation after an allocation pass.
#[derive(Debug, Clone)]
pub struct SubstationLoad {
    /// Substation identifier.
    pub id: String,
    /// Accumulated load this tick (MW).
    pub load_mw: f32,
    /// Congestion threshold (MW).
    pub max_power_mw: f32,
    /// Whether the load strictly exceeded the threshold.
    pub congested: bool,
}

/// Complete record of one allocation tick.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Tick index.
    pub tick: usize,
    /// Sum of positive train power draws (MW).
    pub demand_mw: f32,
    /// Power actually attributed to substations (MW).
    pub allocated_mw: f32,
    /// Demand left unserved after exhausting in-range substations (MW).
    pub unserved_mw: f32,
    /// Trains with no substation in supply range this tick.
    pub out_of_range_trains: usize,
    /// Substations whose load exceeded their threshold.
    pub congested_substations: usize,
    /// Per-substation loads in registration order.
    pub substation_loads: Vec<SubstationLoad>,
}

impl fmt::Display for TickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick={:>3} | demand={:>6.2} MW  allocated={:>6.2} MW  \
             unserved={:>5.2} MW | congested={}/{}  out_of_range={}",
            self.tick,
            self.demand_mw,
            self.allocated_mw,
            self.unserved_mw,
            self.congested_substations,
            self.substation_loads.len(),
            self.out_of_range_trains,
        )
    }
}
