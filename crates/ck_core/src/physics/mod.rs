//! Ball flight physics: force model, adaptive integrator, event-driven
//! simulation loop.

pub mod forces;
pub mod integrator;
pub mod simulate;

pub use simulate::Simulator;
