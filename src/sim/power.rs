//! Train operating phases and per-phase power draw.

/// Operating phase of a train.
///
/// The phase set is closed; power dispatch is a total match over these
/// three variants with no default arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainPhase {
    /// Drawing full traction power.
    Cruising,
    /// Rolling with traction mostly off.
    Coasting,
    /// Regenerative braking, feeding power back.
    Braking,
}

impl TrainPhase {
    /// Lowercase phase name for status output.
    pub fn as_str(self) -> &'static str {
        match self {
            TrainPhase::Cruising => "cruising",
            TrainPhase::Coasting => "coasting",
            TrainPhase::Braking => "braking",
        }
    }
}

/// Per-phase power draw of a train, in MW.
///
/// Braking power is negative (regenerative). Immutable once built and
/// owned by the train.
#[derive(Debug, Clone, Copy)]
pub struct PowerProfile {
    /// Power drawn while cruising (MW, positive).
    pub cruising_mw: f32,
    /// Power drawn while coasting (MW).
    pub coasting_mw: f32,
    /// Power while braking (MW, negative for regeneration).
    pub braking_mw: f32,
}

/// Coasting draw as a fraction of cruising draw.
const COASTING_FACTOR: f32 = 0.2;
/// Regenerated braking power as a fraction of cruising draw.
const BRAKING_FACTOR: f32 = -0.15;

impl PowerProfile {
    /// Creates a profile with explicit per-phase values.
    pub fn new(cruising_mw: f32, coasting_mw: f32, braking_mw: f32) -> Self {
        Self {
            cruising_mw,
            coasting_mw,
            braking_mw,
        }
    }

    /// Derives a profile from a single cruising power: coasting is 0.2x
    /// and braking regenerates 0.15x.
    pub fn from_cruising(cruising_mw: f32) -> Self {
        Self {
            cruising_mw,
            coasting_mw: cruising_mw * COASTING_FACTOR,
            braking_mw: cruising_mw * BRAKING_FACTOR,
        }
    }

    /// Returns the draw for the given phase in MW.
    pub fn draw_mw(&self, phase: TrainPhase) -> f32 {
        match phase {
            TrainPhase::Cruising => self.cruising_mw,
            TrainPhase::Coasting => self.coasting_mw,
            TrainPhase::Braking => self.braking_mw,
        }
    }
}
