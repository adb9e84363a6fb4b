//! End-to-end allocation behavior over whole networks.

mod common;

use traction_sim::sim::network::Network;
use traction_sim::sim::power::TrainPhase;
use traction_sim::sim::substation::Substation;
use traction_sim::sim::track::TrackPosition;

#[test]
fn colocated_train_loads_single_station_without_congestion() {
    let mut net = Network::new();
    net.add_substation(common::substation("SUB_1", 0.0, 5.0))
        .expect("unique id");
    net.add_train(common::train("T1", 0.0, 4.0)).expect("unique id");

    let result = net.allocate_power();
    assert!((net.substations()[0].load_mw() - 4.0).abs() < 1e-6);
    assert!(!net.substations()[0].is_congested());
    assert_eq!(result.congested_substations, 0);
}

#[test]
fn overloaded_station_is_congested_after_tick() {
    let mut net = Network::new();
    net.add_substation(common::substation("SUB_1", 0.0, 5.0))
        .expect("unique id");
    net.add_train(common::train("T1", 0.0, 6.0)).expect("unique id");

    let result = net.allocate_power();
    assert!((net.substations()[0].load_mw() - 6.0).abs() < 1e-6);
    assert!(net.substations()[0].is_congested());
    assert_eq!(result.congested_substations, 1);
}

#[test]
fn out_of_range_train_leaves_loads_untouched() {
    let mut net = Network::new();
    net.add_substation(common::substation("SUB_1", 0.0, 5.0))
        .expect("unique id");
    net.add_train(common::train("T1", 15.0, 4.0)).expect("unique id");

    assert!(
        net.nearest_substations(TrackPosition::new(15.0), 10.0)
            .is_empty()
    );
    let result = net.allocate_power();
    assert_eq!(net.substations()[0].load_mw(), 0.0);
    assert_eq!(result.out_of_range_trains, 1);
}

#[test]
fn two_station_split_covers_demand_exactly() {
    let mut net = Network::new();
    net.add_substation(common::substation("A", 0.0, 100.0))
        .expect("unique id");
    net.add_substation(common::substation("B", 8.0, 100.0))
        .expect("unique id");
    net.add_train(common::train("T1", 4.0, 10.0)).expect("unique id");

    let result = net.allocate_power();
    assert!((net.substations()[0].load_mw() - 6.0).abs() < 1e-5);
    assert!((net.substations()[1].load_mw() - 4.0).abs() < 1e-5);
    assert!((result.allocated_mw - result.demand_mw).abs() < 1e-5);
}

#[test]
fn multiple_trains_accumulate_on_shared_station() {
    let mut net = Network::new();
    net.add_substation(common::substation("SUB_1", 0.0, 5.0))
        .expect("unique id");
    net.add_train(common::train("T1", 0.0, 3.0)).expect("unique id");
    net.add_train(common::train("T2", 0.0, 3.0)).expect("unique id");

    let result = net.allocate_power();
    // Both trains fully served by the colocated station: 6 MW > 5 MW.
    assert!((net.substations()[0].load_mw() - 6.0).abs() < 1e-5);
    assert!(net.substations()[0].is_congested());
    assert_eq!(result.congested_substations, 1);
}

#[test]
fn allocation_per_train_is_capped_by_its_draw() {
    let mut net = Network::new();
    for (id, km) in [("A", 0.0), ("B", 2.0), ("C", 4.0), ("D", 6.0)] {
        net.add_substation(common::substation(id, km, 100.0))
            .expect("unique id");
    }
    net.add_train(common::train("T1", 3.0, 2.0)).expect("unique id");

    net.allocate_power();
    let total: f32 = net.substations().iter().map(Substation::load_mw).sum();
    assert!(total <= 2.0 + 1e-5);
}

#[test]
fn braking_trains_do_not_feed_stations() {
    let mut net = common::baseline_network();
    if let Some(t) = net.train_mut("TRAIN_1") {
        t.set_phase(TrainPhase::Braking);
    }

    let result = net.allocate_power();
    for sub in net.substations() {
        assert_eq!(sub.load_mw(), 0.0);
    }
    assert_eq!(result.demand_mw, 0.0);
    assert_eq!(result.allocated_mw, 0.0);
}

#[test]
fn coasting_reduces_draw_to_one_fifth() {
    let mut net = common::baseline_network();
    if let Some(t) = net.train_mut("TRAIN_1") {
        t.set_phase(TrainPhase::Coasting);
    }

    let result = net.allocate_power();
    assert!((result.demand_mw - 0.8).abs() < 1e-6);
    assert!((result.allocated_mw - 0.8).abs() < 1e-5);
}

#[test]
fn congestion_flags_never_stay_stale_across_ticks() {
    let mut net = Network::new();
    net.add_substation(common::substation("SUB_1", 0.0, 5.0))
        .expect("unique id");
    net.add_train(common::train("T1", 0.0, 6.0)).expect("unique id");

    net.allocate_power();
    assert!(net.substations()[0].is_congested());

    // Train moves out of range: next tick must clear the flag.
    if let Some(t) = net.train_mut("T1") {
        t.move_to(TrackPosition::new(50.0));
    }
    net.allocate_power();
    assert!(!net.substations()[0].is_congested());
    assert_eq!(net.substations()[0].load_mw(), 0.0);
}

#[test]
fn greedy_order_is_deterministic_across_runs() {
    let run = |intermediate_km: f32| -> Vec<f32> {
        let mut net = Network::new();
        net.add_substation(common::substation("A", 0.0, 3.0))
            .expect("unique id");
        net.add_substation(common::substation("B", 8.0, 3.0))
            .expect("unique id");
        net.add_train(common::train("T1", intermediate_km, 10.0))
            .expect("unique id");
        net.allocate_power();
        net.substations().iter().map(Substation::load_mw).collect()
    };

    // Equidistant train: repeated runs split identically.
    assert_eq!(run(4.0), run(4.0));
}
