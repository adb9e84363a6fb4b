pub mod kpi;
/// Entity registries and the per-tick greedy allocation pass.
pub mod network;
/// Train phases and per-phase power profiles.
pub mod power;
pub mod status;
/// Traction substation model with distance-decay contributions.
pub mod substation;
pub mod track;
pub mod train;
pub mod types;
