//! Shared fixtures for integration tests.

use traction_sim::sim::network::Network;
use traction_sim::sim::power::PowerProfile;
use traction_sim::sim::substation::{Substation, SubstationCapacity};
use traction_sim::sim::track::TrackPosition;
use traction_sim::sim::train::Train;

pub fn substation(id: &str, position_km: f32, max_power_mw: f32) -> Substation {
    Substation::new(
        id,
        SubstationCapacity::with_threshold(max_power_mw),
        TrackPosition::new(position_km),
    )
}

pub fn train(id: &str, position_km: f32, cruising_mw: f32) -> Train {
    Train::new(
        id,
        PowerProfile::from_cruising(cruising_mw),
        TrackPosition::new(position_km),
    )
}

/// Two substations 8 km apart with one train between them, matching
/// the baseline preset geometry.
pub fn baseline_network() -> Network {
    let mut net = Network::new();
    net.add_substation(substation("SUB_1", 0.0, 5.0))
        .expect("unique id");
    net.add_substation(substation("SUB_2", 8.0, 5.0))
        .expect("unique id");
    net.add_train(train("TRAIN_1", 4.0, 4.0)).expect("unique id");
    net
}
