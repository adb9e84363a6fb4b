use crate::sim::power::{PowerProfile, TrainPhase};
use crate::sim::track::TrackPosition;

/// A train moving along the track.
///
/// Owns its power profile; phase and position are advanced externally
/// between ticks by a drive cycle — the network core only reads
/// whatever state it observes when allocation runs.
#[derive(Debug, Clone)]
pub struct Train {
    id: String,
    profile: PowerProfile,
    position: TrackPosition,
    phase: TrainPhase,
}

impl Train {
    /// Creates a train at `position` in the `Cruising` phase.
    pub fn new(id: impl Into<String>, profile: PowerProfile, position: TrackPosition) -> Self {
        Self {
            id: id.into(),
            profile,
            position,
            phase: TrainPhase::Cruising,
        }
    }

    /// Returns the unique train identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the current position.
    pub fn position(&self) -> TrackPosition {
        self.position
    }

    /// Returns the current operating phase.
    pub fn phase(&self) -> TrainPhase {
        self.phase
    }

    /// Returns the power profile.
    pub fn profile(&self) -> &PowerProfile {
        &self.profile
    }

    /// Current power draw in MW, negative while braking.
    pub fn power_draw_mw(&self) -> f32 {
        self.profile.draw_mw(self.phase)
    }

    /// Replaces the position. Any value is accepted; track-bounds
    /// checking is not this type's concern.
    pub fn move_to(&mut self, position: TrackPosition) {
        self.position = position;
    }

    /// Replaces the operating phase.
    pub fn set_phase(&mut self, phase: TrainPhase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_train() -> Train {
        Train::new(
            "ICE_1",
            PowerProfile::from_cruising(4.0),
            TrackPosition::new(0.0),
        )
    }

    #[test]
    fn new_train_starts_cruising() {
        let train = test_train();
        assert_eq!(train.phase(), TrainPhase::Cruising);
        assert_eq!(train.power_draw_mw(), 4.0);
    }

    #[test]
    fn draw_follows_phase_changes() {
        let mut train = test_train();
        train.set_phase(TrainPhase::Coasting);
        assert!((train.power_draw_mw() - 0.8).abs() < 1e-6);
        train.set_phase(TrainPhase::Braking);
        assert!((train.power_draw_mw() + 0.6).abs() < 1e-6);
    }

    #[test]
    fn move_to_replaces_position() {
        let mut train = test_train();
        train.move_to(TrackPosition::new(12.5));
        assert_eq!(train.position().km, 12.5);
        // No validation: negative coordinates pass through.
        train.move_to(TrackPosition::new(-3.0));
        assert_eq!(train.position().km, -3.0);
    }
}
