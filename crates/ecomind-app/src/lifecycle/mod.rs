//! Application wiring.

pub mod ecomind_system;

pub use ecomind_system::EcoMindSystem;
