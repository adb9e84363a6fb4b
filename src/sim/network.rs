//! Network controller: entity registries and per-tick power allocation.

use std::fmt;

use log::warn;

use crate::sim::substation::{SUPPLY_RANGE_KM, Substation};
use crate::sim::track::TrackPosition;
use crate::sim::train::Train;
use crate::sim::types::{SubstationLoad, TickResult};

/// Registration failure: identifiers must be unique per registry.
///
/// Raised at construction time, before the tick loop ever runs; the
/// network does not attempt partial recovery from invalid entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A substation with this id is already registered.
    DuplicateSubstation(String),
    /// A train with this id is already registered.
    DuplicateTrain(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateSubstation(id) => {
                write!(f, "duplicate substation id \"{id}\"")
            }
            RegistryError::DuplicateTrain(id) => write!(f, "duplicate train id \"{id}\""),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of trains and substations plus the per-tick allocation pass.
///
/// The controller exclusively owns both registries; entities carry no
/// back-references and every relational query (distance, range
/// membership) is computed on demand from positions. Registries keep
/// registration order so the order-sensitive greedy allocation and its
/// tie-breaks are reproducible.
#[derive(Debug, Default)]
pub struct Network {
    substations: Vec<Substation>,
    trains: Vec<Train>,
    track_length_km: f32,
    tick: usize,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a substation and extends the known track length.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSubstation`] if the id is taken.
    pub fn add_substation(&mut self, substation: Substation) -> Result<(), RegistryError> {
        if self.substations.iter().any(|s| s.id() == substation.id()) {
            return Err(RegistryError::DuplicateSubstation(
                substation.id().to_string(),
            ));
        }
        // Track length only ever grows.
        self.track_length_km = self.track_length_km.max(substation.position().km);
        self.substations.push(substation);
        Ok(())
    }

    /// Registers a train.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTrain`] if the id is taken.
    pub fn add_train(&mut self, train: Train) -> Result<(), RegistryError> {
        if self.trains.iter().any(|t| t.id() == train.id()) {
            return Err(RegistryError::DuplicateTrain(train.id().to_string()));
        }
        self.trains.push(train);
        Ok(())
    }

    /// Maximum substation coordinate registered so far, in km.
    pub fn track_length_km(&self) -> f32 {
        self.track_length_km
    }

    /// Substations in registration order.
    pub fn substations(&self) -> &[Substation] {
        &self.substations
    }

    /// Trains in registration order.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Mutable access to one train, for the drive cycle advancing
    /// phase and position between ticks.
    pub fn train_mut(&mut self, id: &str) -> Option<&mut Train> {
        self.trains.iter_mut().find(|t| t.id() == id)
    }

    /// Substations within `max_distance` of `position`, paired with
    /// their distance and sorted nearest-first.
    ///
    /// Ties at equal distance keep registration order (stable sort), so
    /// repeated runs over the same scenario walk substations in the
    /// same order.
    pub fn nearest_substations(
        &self,
        position: TrackPosition,
        max_distance: f32,
    ) -> Vec<(&Substation, f32)> {
        self.nearest_indices(position, max_distance)
            .into_iter()
            .map(|(idx, d)| (&self.substations[idx], d))
            .collect()
    }

    fn nearest_indices(&self, position: TrackPosition, max_distance: f32) -> Vec<(usize, f32)> {
        let mut nearby: Vec<(usize, f32)> = self
            .substations
            .iter()
            .enumerate()
            .filter_map(|(idx, sub)| {
                let distance = sub.position().distance_to(position);
                (distance <= max_distance).then_some((idx, distance))
            })
            .collect();
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        nearby
    }

    /// Runs one allocation tick over the whole network.
    ///
    /// Resets every substation load, then walks trains in registration
    /// order and satisfies each train's draw greedily from the
    /// nearest-first in-range substations, capping the sum of shares at
    /// the train's total demand. A train with no substation in range is
    /// skipped with a warning; demand the in-range substations cannot
    /// cover is dropped and surfaced as `unserved_mw`. Congestion flags
    /// are recomputed on every substation before the result is built,
    /// so they are never stale across a tick boundary.
    ///
    /// A braking train's negative draw is treated as zero demand: the
    /// walk stops before any substation is visited, so regenerated
    /// power is never pushed into substation loads.
    pub fn allocate_power(&mut self) -> TickResult {
        for sub in &mut self.substations {
            sub.reset_load();
        }

        let mut demand_mw = 0.0_f32;
        let mut allocated_mw = 0.0_f32;
        let mut out_of_range_trains = 0_usize;

        for i in 0..self.trains.len() {
            let train = &self.trains[i];
            demand_mw += train.power_draw_mw().max(0.0);

            let nearest = self.nearest_indices(train.position(), SUPPLY_RANGE_KM);
            if nearest.is_empty() {
                warn!(
                    "train {} at {:.1} km is out of supply range of every substation",
                    train.id(),
                    train.position().km
                );
                out_of_range_trains += 1;
                continue;
            }

            let mut remaining = self.trains[i].power_draw_mw();
            for (idx, _distance) in nearest {
                if remaining <= 0.0 {
                    break;
                }
                let train = &self.trains[i];
                let contribution = self.substations[idx].contribution_to_mw(train);
                let actual = contribution.min(remaining);
                self.substations[idx].add_load_mw(actual);
                allocated_mw += actual;
                remaining -= actual;
            }
        }

        for sub in &mut self.substations {
            sub.update_congestion();
        }

        let substation_loads: Vec<SubstationLoad> = self
            .substations
            .iter()
            .map(|s| SubstationLoad {
                id: s.id().to_string(),
                load_mw: s.load_mw(),
                max_power_mw: s.capacity().max_power_mw,
                congested: s.is_congested(),
            })
            .collect();
        let congested_substations = substation_loads.iter().filter(|s| s.congested).count();

        let tick = self.tick;
        self.tick += 1;

        TickResult {
            tick,
            demand_mw,
            allocated_mw,
            unserved_mw: (demand_mw - allocated_mw).max(0.0),
            out_of_range_trains,
            congested_substations,
            substation_loads,
        }
    }
}
