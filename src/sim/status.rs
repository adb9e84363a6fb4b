//! Read-only network status snapshots for the presentation layer.
//!
//! The core formats nothing itself; these snapshots carry everything a
//! status display needs, with `Display` impls the binary can print.

use std::fmt;

use crate::sim::network::Network;
use crate::sim::substation::SUPPLY_RANGE_KM;
use crate::sim::train::Train;

/// How many nearest substations a train status lists.
const NEAREST_SHOWN: usize = 2;

/// Snapshot of one substation after a tick.
#[derive(Debug, Clone)]
pub struct SubstationStatus {
    /// Substation identifier.
    pub id: String,
    /// Position along the track (km).
    pub position_km: f32,
    /// Load accumulated this tick (MW).
    pub load_mw: f32,
    /// Congestion threshold (MW).
    pub max_power_mw: f32,
    /// Whether the substation is congested.
    pub congested: bool,
}

/// Snapshot of one train after a tick.
#[derive(Debug, Clone)]
pub struct TrainStatus {
    /// Train identifier.
    pub id: String,
    /// Position along the track (km).
    pub position_km: f32,
    /// Operating phase name.
    pub phase: &'static str,
    /// Current power draw (MW, negative while braking).
    pub power_draw_mw: f32,
    /// Up to two nearest in-range substations as (id, distance km).
    pub nearest: Vec<(String, f32)>,
}

/// Snapshot of the whole network.
#[derive(Debug, Clone)]
pub struct NetworkStatus {
    /// Maximum substation coordinate registered (km).
    pub track_length_km: f32,
    /// Per-substation snapshots in registration order.
    pub substations: Vec<SubstationStatus>,
    /// Per-train snapshots in registration order.
    pub trains: Vec<TrainStatus>,
}

impl Network {
    /// Builds a read-only snapshot of the current network state.
    pub fn status(&self) -> NetworkStatus {
        NetworkStatus {
            track_length_km: self.track_length_km(),
            substations: self
                .substations()
                .iter()
                .map(|s| SubstationStatus {
                    id: s.id().to_string(),
                    position_km: s.position().km,
                    load_mw: s.load_mw(),
                    max_power_mw: s.capacity().max_power_mw,
                    congested: s.is_congested(),
                })
                .collect(),
            trains: self.trains().iter().map(|t| self.train_status(t)).collect(),
        }
    }

    fn train_status(&self, train: &Train) -> TrainStatus {
        let nearest = self
            .nearest_substations(train.position(), SUPPLY_RANGE_KM)
            .into_iter()
            .take(NEAREST_SHOWN)
            .map(|(sub, distance)| (sub.id().to_string(), distance))
            .collect();
        TrainStatus {
            id: train.id().to_string(),
            position_km: train.position().km,
            phase: train.phase().as_str(),
            power_draw_mw: train.power_draw_mw(),
            nearest,
        }
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Network Status ===")?;
        writeln!(f, "Track length: {:.1} km", self.track_length_km)?;
        writeln!(f, "Substations:")?;
        for s in &self.substations {
            let state = if s.congested { "CONGESTED" } else { "normal" };
            writeln!(
                f,
                "  {} at {:.1} km: load {:.2} / {:.2} MW [{state}]",
                s.id, s.position_km, s.load_mw, s.max_power_mw
            )?;
        }
        writeln!(f, "Trains:")?;
        for t in &self.trains {
            write!(
                f,
                "  {} at {:.1} km: {} {:.2} MW, nearest:",
                t.id, t.position_km, t.phase, t.power_draw_mw
            )?;
            if t.nearest.is_empty() {
                write!(f, " none in range")?;
            }
            for (id, distance) in &t.nearest {
                write!(f, " {id} ({distance:.1} km)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
