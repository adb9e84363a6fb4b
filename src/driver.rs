//! Drive cycles that advance trains between ticks.
//!
//! The network core only reacts to whatever train state it observes
//! when allocation runs; these cycles are the external driving process
//! that mutates phase and position between ticks.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::sim::power::TrainPhase;
use crate::sim::track::TrackPosition;
use crate::sim::train::Train;

/// A per-train drive cycle: constant speed with direction reversal at
/// the track ends, and phase changes after randomly sampled dwells.
///
/// Dwell lengths come from a seeded [`StdRng`], so a run is fully
/// reproducible from the master seed. Phases rotate
/// cruising -> coasting -> braking -> cruising.
#[derive(Debug, Clone)]
pub struct DriveCycle {
    train_id: String,
    speed_km_per_tick: f32,
    dwell_ticks_min: usize,
    dwell_ticks_max: usize,
    direction: f32,
    dwell_left: usize,
    rng: StdRng,
}

impl DriveCycle {
    /// Creates a drive cycle for the train with id `train_id`.
    ///
    /// # Panics
    ///
    /// Panics if the speed is negative or the dwell range is empty or
    /// inverted.
    pub fn new(
        train_id: impl Into<String>,
        speed_km_per_tick: f32,
        dwell_ticks_min: usize,
        dwell_ticks_max: usize,
        seed: u64,
    ) -> Self {
        assert!(speed_km_per_tick >= 0.0);
        assert!(dwell_ticks_min > 0);
        assert!(dwell_ticks_max >= dwell_ticks_min);

        Self {
            train_id: train_id.into(),
            speed_km_per_tick,
            dwell_ticks_min,
            dwell_ticks_max,
            direction: 1.0,
            dwell_left: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the id of the train this cycle drives.
    pub fn train_id(&self) -> &str {
        &self.train_id
    }

    /// Advances `train` by one tick: samples a new phase when the
    /// current dwell is exhausted, then moves the train, reversing at
    /// the ends of `[0, track_length_km]`.
    pub fn advance(&mut self, train: &mut Train, track_length_km: f32) {
        if self.dwell_left == 0 {
            train.set_phase(next_phase(train.phase()));
            self.dwell_left = self
                .rng
                .random_range(self.dwell_ticks_min..=self.dwell_ticks_max);
        }
        self.dwell_left -= 1;

        let mut km = train.position().km + self.direction * self.speed_km_per_tick;
        if km > track_length_km {
            km = track_length_km;
            self.direction = -1.0;
        } else if km < 0.0 {
            km = 0.0;
            self.direction = 1.0;
        }
        train.move_to(TrackPosition::new(km));
    }
}

fn next_phase(phase: TrainPhase) -> TrainPhase {
    match phase {
        TrainPhase::Cruising => TrainPhase::Coasting,
        TrainPhase::Coasting => TrainPhase::Braking,
        TrainPhase::Braking => TrainPhase::Cruising,
    }
}
