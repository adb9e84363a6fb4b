//! Railway traction power network simulator.
//!
//! Models how power drawn by moving trains is apportioned among fixed
//! substations by proximity, and checks each substation's load against
//! its congestion threshold once per tick.

/// TOML scenario configuration and presets.
pub mod config;
pub mod driver;
pub mod io;
/// Network core: entities, allocation, status, and KPIs.
pub mod sim;
