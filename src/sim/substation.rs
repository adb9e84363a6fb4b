use crate::sim::track::TrackPosition;
use crate::sim::train::Train;

/// Maximum distance at which a substation can feed a train, in km.
///
/// Beyond this range the contribution is exactly zero; inside it the
/// contribution decays linearly with distance.
pub const SUPPLY_RANGE_KM: f32 = 10.0;

/// Electrical configuration of a substation.
///
/// Only `max_power_mw` participates in congestion evaluation; the
/// voltage and current limits are carried for electrical reporting.
#[derive(Debug, Clone, Copy)]
pub struct SubstationCapacity {
    /// Load threshold above which the substation is congested (MW).
    pub max_power_mw: f32,
    /// Nominal catenary voltage (kV).
    pub nominal_voltage_kv: f32,
    /// Minimum acceptable catenary voltage (kV).
    pub min_voltage_kv: f32,
    /// Maximum feeder current (A).
    pub max_current_a: f32,
}

impl SubstationCapacity {
    /// Creates a capacity with the given threshold and the standard
    /// 1.5 kV / 1.0 kV / 5000 A electrical limits.
    pub fn with_threshold(max_power_mw: f32) -> Self {
        Self {
            max_power_mw,
            nominal_voltage_kv: 1.5,
            min_voltage_kv: 1.0,
            max_current_a: 5000.0,
        }
    }
}

/// A fixed traction power substation.
///
/// Tracks the load accumulated during one allocation pass and a derived
/// congestion flag. The flag holds `load_mw > capacity.max_power_mw`
/// and is recomputed after every tick, never carried over stale.
#[derive(Debug, Clone)]
pub struct Substation {
    id: String,
    capacity: SubstationCapacity,
    position: TrackPosition,
    load_mw: f32,
    congested: bool,
}

impl Substation {
    /// Creates a substation with zero load.
    pub fn new(
        id: impl Into<String>,
        capacity: SubstationCapacity,
        position: TrackPosition,
    ) -> Self {
        Self {
            id: id.into(),
            capacity,
            position,
            load_mw: 0.0,
            congested: false,
        }
    }

    /// Returns the unique substation identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the fixed position.
    pub fn position(&self) -> TrackPosition {
        self.position
    }

    /// Returns the electrical capacity.
    pub fn capacity(&self) -> &SubstationCapacity {
        &self.capacity
    }

    /// Returns the load accumulated this tick (MW).
    pub fn load_mw(&self) -> f32 {
        self.load_mw
    }

    /// Returns `true` when the last congestion update found the load
    /// strictly above the threshold.
    pub fn is_congested(&self) -> bool {
        self.congested
    }

    /// The power this substation would supply to `train` if demand were
    /// unconstrained: full draw at zero distance, decaying linearly to
    /// zero at [`SUPPLY_RANGE_KM`].
    ///
    /// The caller caps the sum over substations at the train's total
    /// demand; this function enforces no such constraint.
    pub fn contribution_to_mw(&self, train: &Train) -> f32 {
        let distance = self.position.distance_to(train.position());
        if distance > SUPPLY_RANGE_KM {
            return 0.0;
        }
        let factor = (SUPPLY_RANGE_KM - distance) / SUPPLY_RANGE_KM;
        train.power_draw_mw() * factor
    }

    /// Clears accumulated load at the start of an allocation pass.
    pub fn reset_load(&mut self) {
        self.load_mw = 0.0;
    }

    /// Adds an allocated share to the accumulating load.
    pub fn add_load_mw(&mut self, mw: f32) {
        self.load_mw += mw;
    }

    /// Recomputes the congestion flag from current load and threshold.
    ///
    /// Idempotent; depends only on current state, not on history.
    pub fn update_congestion(&mut self) {
        self.congested = self.load_mw > self.capacity.max_power_mw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::power::{PowerProfile, TrainPhase};

    fn substation_at(km: f32, threshold_mw: f32) -> Substation {
        Substation::new(
            "SUB_1",
            SubstationCapacity::with_threshold(threshold_mw),
            TrackPosition::new(km),
        )
    }

    fn cruising_train_at(km: f32, cruising_mw: f32) -> Train {
        Train::new(
            "T1",
            PowerProfile::from_cruising(cruising_mw),
            TrackPosition::new(km),
        )
    }

    #[test]
    fn contribution_is_full_draw_at_zero_distance() {
        let sub = substation_at(5.0, 10.0);
        let train = cruising_train_at(5.0, 4.0);
        assert_eq!(sub.contribution_to_mw(&train), 4.0);
    }

    #[test]
    fn contribution_is_zero_beyond_range() {
        let sub = substation_at(0.0, 10.0);
        let train = cruising_train_at(10.1, 4.0);
        assert_eq!(sub.contribution_to_mw(&train), 0.0);
    }

    #[test]
    fn contribution_decays_linearly() {
        let sub = substation_at(0.0, 10.0);
        // 4 km away: factor (10 - 4) / 10 = 0.6
        let train = cruising_train_at(4.0, 10.0);
        assert!((sub.contribution_to_mw(&train) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn contribution_at_exact_range_boundary_is_zero() {
        let sub = substation_at(0.0, 10.0);
        let train = cruising_train_at(SUPPLY_RANGE_KM, 4.0);
        // d == R is inside range but the decay factor is exactly zero.
        assert_eq!(sub.contribution_to_mw(&train), 0.0);
    }

    #[test]
    fn braking_train_has_negative_contribution_value() {
        let sub = substation_at(0.0, 10.0);
        let mut train = cruising_train_at(0.0, 4.0);
        train.set_phase(TrainPhase::Braking);
        assert!((sub.contribution_to_mw(&train) + 0.6).abs() < 1e-6);
    }

    #[test]
    fn congestion_is_strictly_above_threshold() {
        let mut sub = substation_at(0.0, 5.0);
        sub.add_load_mw(5.0);
        sub.update_congestion();
        assert!(!sub.is_congested());

        sub.add_load_mw(0.1);
        sub.update_congestion();
        assert!(sub.is_congested());
    }

    #[test]
    fn update_congestion_is_idempotent() {
        let mut sub = substation_at(0.0, 5.0);
        sub.add_load_mw(6.0);
        sub.update_congestion();
        let first = sub.is_congested();
        sub.update_congestion();
        assert_eq!(sub.is_congested(), first);
    }

    #[test]
    fn reset_clears_load_but_congestion_needs_recompute() {
        let mut sub = substation_at(0.0, 5.0);
        sub.add_load_mw(6.0);
        sub.update_congestion();
        assert!(sub.is_congested());

        sub.reset_load();
        assert_eq!(sub.load_mw(), 0.0);
        sub.update_congestion();
        assert!(!sub.is_congested());
    }

    #[test]
    fn with_threshold_carries_standard_electrical_limits() {
        let cap = SubstationCapacity::with_threshold(8.0);
        assert_eq!(cap.max_power_mw, 8.0);
        assert_eq!(cap.nominal_voltage_kv, 1.5);
        assert_eq!(cap.min_voltage_kv, 1.0);
        assert_eq!(cap.max_current_a, 5000.0);
    }
}
